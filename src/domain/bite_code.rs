use rand::Rng;
use rand::rngs::OsRng;

/// Characters allowed in bite codes (uppercase alphanumeric, excluding confusing chars)
/// Removed: 0, O, I, 1, L so codes survive being read aloud in the field
const BITE_CODE_CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// 26 symbols over a 31-character alphabet carry ~128.8 bits of entropy.
pub const BITE_CODE_LENGTH: usize = 26;

/// Generate a fresh bite code from the operating system's CSPRNG.
#[must_use]
pub fn generate_bite_code() -> String {
    let mut rng = OsRng;
    (0..BITE_CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..BITE_CODE_CHARS.len());
            BITE_CODE_CHARS[idx] as char
        })
        .collect()
}

/// Validate bite code format
#[must_use]
pub fn is_valid_bite_code(code: &str) -> bool {
    code.len() == BITE_CODE_LENGTH
        && code
            .bytes()
            .all(|c| BITE_CODE_CHARS.contains(&c.to_ascii_uppercase()))
}

/// Normalize user input: trimmed, uppercase, spaces and dashes dropped.
#[must_use]
pub fn normalize_bite_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
