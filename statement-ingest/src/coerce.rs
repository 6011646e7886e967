/// Best-effort amount parse: thousands commas stripped, blanks and junk become `None`.
pub fn coerce_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "");
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}
