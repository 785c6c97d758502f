use std::sync::Arc;

use menuscan_core::application::MenuScanService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MenuScanService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MenuScanService) -> Self {
        Self { args, service }
    }
}
