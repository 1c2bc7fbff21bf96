use crate::models::VoucherRequest;
use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "januar", "februar", "mars", "april", "mai", "juni", "juli", "august", "september", "oktober",
    "november", "desember",
];

const STYLE: &str = r#"
    @page { size: A4; margin: 0; }
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: Arial, sans-serif; font-size: 11pt; line-height: 1.4; color: #000; padding: 25px; display: flex; flex-direction: column; min-height: 100vh; }
    .content { flex: 1; display: flex; flex-direction: column; }
    .header { border-bottom: 2px solid #0066cc; padding-bottom: 10px; margin-bottom: 15px; }
    .site-name { font-size: 24px; font-weight: bold; color: #0066cc; }
    .voucher-info { background: #e6f2ff; padding: 10px; margin-bottom: 15px; border-left: 3px solid #0066cc; font-size: 10pt; }
    h3 { font-size: 14px; margin-bottom: 8px; color: #0066cc; }
    .field-row { margin-bottom: 8px; }
    .field-label { font-weight: bold; color: #333; font-size: 10pt; }
    .field-value { border-bottom: 1px solid #0066cc; min-height: 16px; font-size: 10pt; }
    .notes { white-space: pre-wrap; }
    .signature { margin-top: auto; padding-top: 20px; }
    .signature-box { border-top: 2px solid #0066cc; padding-top: 6px; margin-top: 8px; min-height: 40px; font-size: 8pt; color: #666; }
    .footer { margin-top: 10px; padding-top: 10px; border-top: 2px solid #0066cc; font-size: 8pt; color: #666; text-align: center; }
    .footer p + p { margin-top: 6px; font-size: 7pt; }
"#;

/// Printable A4 voucher document for a completed purchase form
pub fn render_voucher_html(request: &VoucherRequest, number: &str, generated: NaiveDate) -> String {
    let date = format_date(text(&request.date));
    let price = format_price(request.price.unwrap_or_default());

    let mut rows = vec![field("Dato for kjøp", &date)];
    if let Some(title) = non_blank(&request.title) {
        rows.push(field("Hva", &escape_html(title)));
    }
    rows.push(field("Pris", &format!("NOK {},-", price)));
    rows.push(field("Betalingsmåte", &escape_html(text(&request.payment_method))));
    rows.push(field("Selger", &escape_html(text(&request.seller_name))));
    rows.push(field("Kjøper", &escape_html(text(&request.buyer_name))));
    if let Some(location) = non_blank(&request.location) {
        rows.push(field("Sted", &escape_html(location)));
    }
    if let Some(url) = non_blank(&request.source_url) {
        rows.push(field("Finn.no annonse", &escape_html(url)));
    }
    if let Some(notes) = non_blank(&request.notes) {
        rows.push(format!(
            r#"<div class="field-row"><div class="field-label">Kommentarer:</div><div class="field-value notes">{}</div></div>"#,
            escape_html(notes)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="no">
<head>
  <meta charset="UTF-8">
  <title>Kvittering / Regnskapsbilag</title>
  <style>{style}</style>
</head>
<body>
  <div class="content">
    <div class="header">
      <div class="site-name">Finn Kvittering</div>
      <div>Regnskapsbilag for kjøp via Finn.no</div>
    </div>
    <div class="voucher-info">
      <p><strong>Bilagsnummer:</strong> {number}</p>
      <p><strong>Generert:</strong> {generated}</p>
    </div>
    <div class="section">
      <h3>Kjøpsdetaljer:</h3>
      {rows}
    </div>
    <div class="signature">
      <h3>Signatur av selger: <small>(Valgfritt)</small></h3>
      <div class="signature-box">Dato: {date}</div>
    </div>
  </div>
  <div class="footer">
    <p>Generert med FinnKvittering.no, gratis bilaggenerator for Finn.no-kjøp</p>
    <p>Dette bilaget er laget for å oppfylle kravene til egendokumentasjon ved kjøp mellom næringsdrivende og privatpersoner, i henhold til bokføringsforskriften §5-5. Bilaget inneholder all nødvendig informasjon om transaksjonen og kan brukes som grunnlag for regnskapsføring.</p>
    <p><em>Tips: Skjermbilde av betalingstransaksjonen kan legges ved dette bilaget for ekstra dokumentasjon.</em></p>
  </div>
</body>
</html>"#,
        style = STYLE,
        number = escape_html(number),
        generated = long_date(generated),
        rows = rows.join("\n      "),
        date = date,
    )
}

fn field(label: &str, value: &str) -> String {
    format!(
        r#"<div class="field-row"><div class="field-label">{}:</div><div class="field-value">{}</div></div>"#,
        label, value
    )
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Trim and escape text for safe inclusion in the template
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.trim().chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Whole kroner grouped in thousands with non-breaking spaces: `35 000`
pub fn format_price(price: f64) -> String {
    let digits = (price.round().max(0.0) as u64).to_string();
    let len = digits.len();

    digits
        .chars()
        .enumerate()
        .fold(String::new(), |mut out, (i, c)| {
            if i > 0 && (len - i) % 3 == 0 {
                out.push('\u{00A0}');
            }
            out.push(c);
            out
        })
}

/// Norwegian long date for ISO input, the escaped input otherwise
pub fn format_date(date: &str) -> String {
    let trimmed = date.trim();
    let iso = trimmed.get(..10).unwrap_or(trimmed);

    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(parsed) => long_date(parsed),
        Err(_) => escape_html(trimmed),
    }
}

fn long_date(date: NaiveDate) -> String {
    format!("{}. {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> VoucherRequest {
        VoucherRequest {
            date: Some("2026-10-19".to_string()),
            price: Some(35000.0),
            seller_name: Some("Kristin Granlund".to_string()),
            buyer_name: Some("Nordmann Regnskap AS".to_string()),
            payment_method: Some(" Vipps ".to_string()),
            title: Some("Kontorstol".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(35000.0), "35\u{00A0}000");
        assert_eq!(format_price(1234567.4), "1\u{00A0}234\u{00A0}567");
        assert_eq!(format_price(999.0), "999");
        assert_eq!(format_price(0.0), "0");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-10-19"), "19. oktober 2026");
        assert_eq!(format_date("2026-01-05T10:00:00Z"), "5. januar 2026");
        assert_eq!(format_date("i går"), "i går");
        assert_eq!(format_date("<b>"), "&lt;b&gt;");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#" <script>alert("x") & 'y'</script> "#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#039;y&#039;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_template_contents() {
        let generated = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let html = render_voucher_html(&request(), "FK-123456", generated);

        assert!(html.contains("FK-123456"));
        assert!(html.contains("20. oktober 2026"));
        assert!(html.contains("19. oktober 2026"));
        assert!(html.contains("NOK 35\u{00A0}000,-"));
        assert!(html.contains(">Vipps<"));
        assert!(html.contains("Kontorstol"));
        assert!(!html.contains("Sted:"));
        assert!(!html.contains("Kommentarer:"));
    }

    #[test]
    fn test_template_escapes_user_text() {
        let request = VoucherRequest {
            notes: Some("<script>alert(1)</script>".to_string()),
            ..request()
        };
        let html = render_voucher_html(&request, "FK-1", NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
