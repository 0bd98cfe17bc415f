// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod generate;
pub mod history;
pub mod http_server;
pub mod img2img;
pub mod response;
pub mod txt2video;
pub mod upscale;

pub use errors::{ApiError, ErrorResponse};
pub use generate::{generate_handler, GenerateRequest};
pub use history::{list_history_handler, select_history_handler, HistoryResponse};
pub use http_server::{build_router, start_server, AppState};
pub use img2img::img2img_handler;
pub use response::OutputResponse;
pub use txt2video::{txt2video_handler, Txt2VideoRequest};
pub use upscale::{upscale_handler, UpscaleRequest};
