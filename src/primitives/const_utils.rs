//! Const evaluation utilities

/// Compare two strings for equality in a const context
pub const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// FNV-1a 64-bit Hash for strings (const fn)
pub const fn fnv1a_64_str(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut hash: u64 = 0xcbf29ce484222325;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0x100000001b3);
        i += 1;
    }
    hash
}

/// Find `needle` in a list of names (const fn)
pub const fn contains_str(haystack: &[&str], needle: &str) -> bool {
    let mut i = 0;
    while i < haystack.len() {
        if str_eq(haystack[i], needle) {
            return true;
        }
        i += 1;
    }
    false
}

// =============================================================================
// Const Message Buffer
// =============================================================================
//
// Const panics can only carry a single `&str`, so diagnostics that name
// several items are assembled into a fixed buffer first.

/// Capacity of a [`Message`] in bytes. Longer messages are truncated.
pub const MESSAGE_CAPACITY: usize = 512;

/// Fixed-capacity string builder usable in const context.
#[derive(Clone, Copy)]
pub struct Message {
    buf: [u8; MESSAGE_CAPACITY],
    len: usize,
}

impl Message {
    pub const fn new() -> Self {
        Self { buf: [0; MESSAGE_CAPACITY], len: 0 }
    }

    /// Append `s`, truncating at capacity.
    pub const fn push(mut self, s: &str) -> Self {
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() && self.len < MESSAGE_CAPACITY {
            self.buf[self.len] = bytes[i];
            self.len += 1;
            i += 1;
        }
        self
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn as_str(&self) -> &str {
        let bytes: &[u8] = &self.buf;
        let (head, _) = bytes.split_at(self.len);
        match core::str::from_utf8(head) {
            Ok(s) => s,
            // only reachable when truncation split a multi-byte character
            Err(_) => "<diagnostic truncated>",
        }
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Message {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Message").field(&self.as_str()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_eq() {
        const EQ: bool = str_eq("storage", "storage");
        const NE: bool = str_eq("storage", "storagf");
        assert!(EQ);
        assert!(!NE);
        assert!(!str_eq("a", "ab"));
    }

    #[test]
    fn test_fnv_matches_reference_vector() {
        // FNV-1a 64 reference values
        assert_eq!(fnv1a_64_str(""), 0xcbf29ce484222325);
        assert_eq!(fnv1a_64_str("a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn test_message_builds_in_const() {
        const MSG: Message = Message::new().push("duplicate tag `").push("count").push("`");
        assert_eq!(MSG.as_str(), "duplicate tag `count`");
        assert_eq!(MSG.len(), 21);
    }

    #[test]
    fn test_message_truncates() {
        let long = "x".repeat(MESSAGE_CAPACITY + 10);
        let msg = Message::new().push(&long);
        assert_eq!(msg.len(), MESSAGE_CAPACITY);
        assert!(msg.as_str().chars().all(|c| c == 'x'));
    }
}
