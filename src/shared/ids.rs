use getrandom::getrandom;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RUN_SUFFIX_SPACE: u32 = 36 * 36 * 36 * 36;

fn base36_encode_u64(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while value > 0 {
        chars.push(BASE36_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    chars.into_iter().rev().collect()
}

fn base36_encode_fixed_u32(mut value: u32, width: usize) -> String {
    let mut chars = vec!['0'; width];
    for idx in (0..width).rev() {
        chars[idx] = BASE36_ALPHABET[(value % 36) as usize] as char;
        value /= 36;
    }
    chars.into_iter().collect()
}

/// `review-<base36 millis>-<4 random base36 chars>`. Falls back to a zero
/// suffix when the OS cannot supply randomness; ids only label log lines.
pub fn generate_review_run_id(now_millis: u64) -> String {
    let mut bytes = [0_u8; 4];
    let sample = match getrandom(&mut bytes) {
        Ok(()) => u32::from_le_bytes(bytes) % RUN_SUFFIX_SPACE,
        Err(_) => 0,
    };
    format!(
        "review-{}-{}",
        base36_encode_u64(now_millis),
        base36_encode_fixed_u32(sample, 4)
    )
}

pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_has_timestamp_and_fixed_width_suffix() {
        let id = generate_review_run_id(36 * 36 + 1);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "review");
        assert_eq!(parts[1], "101");
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2]
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase()));
    }

    #[test]
    fn base36_handles_zero() {
        assert_eq!(base36_encode_u64(0), "0");
        assert_eq!(base36_encode_fixed_u32(35, 2), "0z");
    }
}
