//! Range header parsing (RFC 7233, single `bytes` range only).
//!
//! The music player seeks within MP3 files, so ranged requests matter here.

/// A byte range resolved against a known file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    /// Inclusive end position
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes the range covers; parsing guarantees `start <= end`
    pub const fn byte_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// What to do with a request's Range header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve the slice with 206
    Partial(ByteRange),
    /// Serve 416 with `Content-Range: bytes */<size>`
    Unsatisfiable,
    /// No header, non-bytes unit, multi-range, or malformed: serve the whole
    /// file with 200
    Full,
}

/// Parse a Range header against the file size.
///
/// Supported forms: `bytes=a-b`, `bytes=a-`, `bytes=-suffix`. Anything else
/// (including multi-range) is ignored rather than rejected, per RFC 7233.
pub fn parse(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(ranges) = range_header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    if file_size == 0 {
        // An empty file has no satisfiable byte range
        return RangeOutcome::Unsatisfiable;
    }
    if ranges.contains(',') {
        // Multi-range is not supported
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = ranges.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return parse_suffix(end_str, file_size);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if end < start {
            return RangeOutcome::Unsatisfiable;
        }
        end.min(file_size - 1)
    };

    RangeOutcome::Partial(ByteRange { start, end })
}

/// `bytes=-N`: the final N bytes of the file
fn parse_suffix(suffix_str: &str, file_size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if suffix == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    // A suffix longer than the file means the whole file
    RangeOutcome::Partial(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}
