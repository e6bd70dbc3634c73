/// Dataset file name for `entries` records: `tetrahedron_pair_<N>_dataset.<ext>`.
///
/// Counts from a thousand up are abbreviated with a `k` or `M` suffix and
/// one decimal, dropping a trailing `.0` (`1500` becomes `1.5k`, `2000000`
/// becomes `2M`).
pub fn format_filename(entries: usize, extension: &str) -> String {
    format!("tetrahedron_pair_{}_dataset.{extension}", abbreviate(entries))
}

fn abbreviate(entries: usize) -> String {
    let (divisor, suffix) = match entries {
        0..1_000 => return entries.to_string(),
        1_000..1_000_000 => (1_000.0, 'k'),
        _ => (1_000_000.0, 'M'),
    };
    let scaled = format!("{:.1}", entries as f64 / divisor);
    let trimmed = scaled.strip_suffix(".0").unwrap_or(&scaled);
    format!("{trimmed}{suffix}")
}
