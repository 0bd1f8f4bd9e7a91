//! Call-stack capture.
//!
//! A [`StackTrace`] stores raw instruction pointers only. Symbol lookup
//! (function, file, line) runs once, the first time the trace is rendered,
//! and the result is cached inside the trace.
//!
//! ```text
//! construction ──► capture(skip) ──► [ip, ip, ip, ...]        (bounded)
//!                                          │
//!        first `{:#}` format ──────────────▼
//!                               [fn file:line, ...]          (cached)
//! ```
//!
//! Frames that cannot be mapped back to a source file are dropped at
//! resolution. So are the leading frames that belong to the capture
//! machinery itself (this crate's constructors and the `backtrace` crate).

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::config::config;

/// Extra raw frames collected on top of `max_frames` to make room for the
/// capture machinery's own frames, which are trimmed at resolution.
const INTERNAL_SLACK: usize = 8;

/// One captured program location, unresolved.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    ip: usize,
}

/// A frame after symbol lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFrame {
    pub function: String,
    pub file: PathBuf,
    pub line: u32,
}

impl Frame {
    /// Raw instruction pointer.
    #[inline]
    pub const fn ip(&self) -> usize {
        self.ip
    }

    /// Look up the symbols for this frame.
    ///
    /// Inlined calls yield several entries for a single frame, innermost
    /// first. Entries without a file or line are left out.
    pub fn resolve(&self) -> Vec<ResolvedFrame> {
        let mut out = Vec::new();
        resolve_ip(self.ip, &mut out);
        out
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:#x})", self.ip)
    }
}

/// An immutable, innermost-first sequence of frames.
pub struct StackTrace {
    frames: Vec<Frame>,
    max_frames: usize,
    resolved: OnceLock<Vec<ResolvedFrame>>,
}

impl StackTrace {
    /// A trace with no frames. Used when capture is disabled and for the
    /// inner message node of a coded error.
    pub const fn empty() -> Self {
        Self {
            frames: Vec::new(),
            max_frames: 0,
            resolved: OnceLock::new(),
        }
    }

    /// Capture the calling thread's stack.
    ///
    /// `capture` itself is never part of the result; `skip` drops that many
    /// additional frames above it. At most `config().max_frames` frames are
    /// kept. Returns an empty trace when capture is disabled.
    #[inline(never)]
    pub fn capture(skip: usize) -> Self {
        let cfg = config();
        if !cfg.capture {
            return Self::empty();
        }
        Self {
            frames: walk(skip, cfg.max_frames + INTERNAL_SLACK),
            max_frames: cfg.max_frames,
            resolved: OnceLock::new(),
        }
    }

    /// Raw frames as captured.
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Resolved, source-mapped frames with the capture machinery trimmed.
    ///
    /// The first call performs symbol lookup; later calls return the cached
    /// result.
    pub fn resolved(&self) -> &[ResolvedFrame] {
        self.resolved.get_or_init(|| {
            let mut out = Vec::with_capacity(self.frames.len());
            for frame in &self.frames {
                resolve_ip(frame.ip, &mut out);
            }
            let internal = out
                .iter()
                .take_while(|f| is_internal(&f.function))
                .count();
            out.drain(..internal);
            out.truncate(self.max_frames);
            out
        })
    }
}

/// `{:#}` renders one `"\n{function}\n\t{file}:{line}"` record per frame.
/// `{}` renders nothing.
impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            return Ok(());
        }
        for frame in self.resolved() {
            write!(f, "\n{}\n\t{}:{}", frame.function, frame.file.display(), frame.line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackTrace")
            .field("frames", &self.frames.len())
            .field("resolved", &self.resolved.get().is_some())
            .finish()
    }
}

/// Capture `skip` frames above the caller. Shorthand for [`StackTrace::capture`].
#[inline(never)]
pub fn capture(skip: usize) -> StackTrace {
    StackTrace::capture(skip + 1)
}

/// Frames that belong to the capture path rather than to the caller.
fn is_internal(function: &str) -> bool {
    let name = function.trim_start_matches('<');
    if name.starts_with("backtrace::") {
        return true;
    }
    let ours = name.starts_with("cerror::") || function.contains(" as cerror::");
    ours && !function.contains("::tests::")
}

cfg_if::cfg_if! {
    if #[cfg(feature = "backtrace")] {
        fn walk(skip: usize, limit: usize) -> Vec<Frame> {
            let anchor = StackTrace::capture as fn(usize) -> StackTrace as usize;
            let mut raw: Vec<Frame> = Vec::with_capacity(limit);
            let mut anchored = false;
            backtrace::trace(|frame| {
                if !anchored && frame.symbol_address() as usize == anchor {
                    // everything up to and including `StackTrace::capture`
                    raw.clear();
                    anchored = true;
                    return true;
                }
                raw.push(Frame { ip: frame.ip() as usize });
                raw.len() < limit + skip
            });
            raw.drain(..skip.min(raw.len()));
            raw.truncate(limit);
            raw
        }

        fn resolve_ip(ip: usize, out: &mut Vec<ResolvedFrame>) {
            if ip == 0 {
                return;
            }
            // Return addresses point one past the call; step back into it.
            let addr = (ip - 1) as *mut std::ffi::c_void;
            backtrace::resolve(addr, |symbol| {
                let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) else {
                    return;
                };
                let function = symbol
                    .name()
                    .map(|name| format!("{name:#}"))
                    .unwrap_or_else(|| String::from("<unknown>"));
                out.push(ResolvedFrame {
                    function,
                    file: file.to_path_buf(),
                    line,
                });
            });
        }
    } else {
        fn walk(_skip: usize, _limit: usize) -> Vec<Frame> {
            Vec::new()
        }

        fn resolve_ip(_ip: usize, _out: &mut Vec<ResolvedFrame>) {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline(never)]
    fn nested(depth: usize) -> StackTrace {
        if depth == 0 {
            capture(0)
        } else {
            nested(depth - 1)
        }
    }

    #[test]
    fn empty_trace_renders_nothing() {
        let trace = StackTrace::empty();
        assert!(trace.is_empty());
        assert!(trace.resolved().is_empty());
        assert_eq!(format!("{}", trace), "");
        assert_eq!(format!("{:#}", trace), "");
    }

    #[test]
    fn plain_format_hides_frames() {
        let trace = capture(0);
        assert_eq!(format!("{}", trace), "");
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn captures_frames() {
        let trace = capture(0);
        assert!(!trace.is_empty(), "expected raw frames");
        assert!(trace.frames().len() <= config().max_frames + INTERNAL_SLACK);
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn verbose_format_has_function_and_location() {
        let trace = capture(0);
        let s = format!("{:#}", trace);
        assert!(s.starts_with('\n'), "expected leading newline in: {s:?}");
        assert!(s.contains("\n\t"), "expected file:line records in: {s:?}");
        for frame in trace.resolved() {
            assert!(!is_internal(&frame.function) || frame.function.contains("::tests::"));
        }
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn depth_is_bounded() {
        let trace = nested(200);
        assert!(trace.frames().len() <= config().max_frames + INTERNAL_SLACK);
        assert!(trace.resolved().len() <= config().max_frames);
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn resolution_is_cached() {
        let trace = capture(0);
        let first = trace.resolved().as_ptr();
        let second = trace.resolved().as_ptr();
        assert_eq!(first, second);
        assert_eq!(format!("{:#}", trace), format!("{:#}", trace));
    }

    #[test]
    fn internal_frame_filter() {
        assert!(is_internal("backtrace::backtrace::trace"));
        assert!(is_internal("cerror::stack::StackTrace::capture"));
        assert!(is_internal("<core::result::Result<T,E> as cerror::convert::ResultExt<T,E>>::wrap"));
        assert!(!is_internal("cerror::stack::tests::nested"));
        assert!(!is_internal("myapp::handlers::lookup"));
        assert!(!is_internal("std::rt::lang_start"));
    }

    #[test]
    fn frame_debug_shows_ip() {
        let frame = Frame { ip: 0x2a };
        assert_eq!(format!("{:?}", frame), "Frame(0x2a)");
        assert_eq!(frame.ip(), 0x2a);
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StackTrace>();
    }
}
