pub struct ByteSize;

impl ByteSize {
    /// Formats a byte count with binary (1024) steps, e.g. `1.50 MB`.
    pub fn format(bytes: u64) -> String {
        const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
        let mut value = bytes as f64;
        let mut unit_index = 0;

        while value >= 1024.0 && unit_index < UNITS.len() - 1 {
            value /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", value, UNITS[unit_index])
        }
    }
}
