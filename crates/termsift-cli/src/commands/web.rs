use anyhow::Result;
use termsift_core::Termsift;

#[derive(Debug, Clone, Copy)]
pub(super) struct WebServeOptions<'a> {
    pub(super) host: &'a str,
    pub(super) port: u16,
}

pub(super) fn serve(app: &Termsift, options: WebServeOptions<'_>) -> Result<()> {
    termsift_web::serve_web(app.clone(), options.host, options.port)
}
