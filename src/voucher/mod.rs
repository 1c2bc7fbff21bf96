pub mod number;
pub mod renderer;
pub mod template;

pub use number::voucher_number;
pub use renderer::{ChromePdfRenderer, PdfRenderer};
pub use template::render_voucher_html;

use crate::models::VoucherRequest;
use anyhow::Result;
use chrono::Utc;
use tracing::info;

/// Rendered voucher ready to send to the client
pub struct RenderedVoucher {
    pub number: String,
    pub pdf: Vec<u8>,
}

impl RenderedVoucher {
    pub fn file_name(&self) -> String {
        format!("kvittering-{}.pdf", self.number)
    }
}

/// Number, lay out and print a voucher for a validated request
pub async fn render_voucher(request: &VoucherRequest, renderer: &dyn PdfRenderer) -> Result<RenderedVoucher> {
    let number = voucher_number(request.source_url.as_deref());
    let html = render_voucher_html(request, &number, Utc::now().date_naive());

    info!("Rendering voucher {}", number);
    let pdf = renderer.render(&html).await?;

    Ok(RenderedVoucher { number, pdf })
}
