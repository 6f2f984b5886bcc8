// Ingestion caps to harden against untrusted input (saved shows, pasted SVG)

// SVG caps
pub const MAX_SVG_LEN: usize = 8 * 1024 * 1024; // 8 MB worth of characters in the 'd' string
pub const MAX_SVG_SEGMENTS: usize = 500_000;

// JSON caps
pub const MAX_JSON_SEGMENTS: usize = 500_000;
pub const MAX_SPLINE_POINTS: usize = 100_000;
pub const MAX_SPLINE_DEGREE: usize = 64;
