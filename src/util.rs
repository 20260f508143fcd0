pub fn format_wind(kmh: f32) -> String {
    format!("{kmh:.0} km/h")
}

pub fn format_pressure(hpa: f32) -> String {
    format!("{hpa:.0} hPa")
}

pub fn short_label(name: &str, max_chars: usize) -> &str {
    match name.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &name[..byte_index],
        None => name,
    }
}
