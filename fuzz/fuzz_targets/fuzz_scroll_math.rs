#![no_main]
use libfuzzer_sys::fuzz_target;
use timeline_strip::scroll::{calculate_center_date_index, calculate_visible_range};

fn float(bytes: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    f64::from_le_bytes(buf)
}

/// Fuzz the scroll calculations with arbitrary floats, including NaN,
/// infinities and negative widths.
fuzz_target!(|data: &[u8]| {
    if data.len() < 36 {
        return;
    }
    let offset = float(&data[0..8]);
    let viewport = float(&data[8..16]);
    let day_width = float(&data[16..24]);
    let day_margin = float(&data[24..32]);
    let total_days = usize::from(u16::from_le_bytes([data[32], data[33]]));
    let buffer_days = usize::from(data[34]);

    let center = calculate_center_date_index(offset, viewport, day_width, day_margin, total_days);
    assert!(center < total_days.max(1));

    let range = calculate_visible_range(
        center,
        viewport,
        day_width,
        day_margin,
        total_days,
        buffer_days,
    );
    assert!(range.start() <= range.end());
    assert!(range.end() <= total_days);
});
