/// Format seconds as `m:ss` for the transport row.
///
/// Unknown values (NaN, infinities, negatives) render as `0:00`.
///
/// ```
/// use clipdeck::player::format_time;
///
/// assert_eq!(format_time(65.0), "1:05");
/// assert_eq!(format_time(f64::NAN), "0:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
