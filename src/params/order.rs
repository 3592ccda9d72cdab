//! Traversal order tokens and lazy position enumeration
//!
//! An order token is two letters over `{x, y, b}`: the first letter is the
//! inner (fastest-varying) axis, lowercase means ascending and uppercase
//! descending. A `b` anywhere selects byte-major traversal over the raw
//! scanline buffer instead of pixel coordinates; there the `b` letter's case
//! gives the within-scanline byte direction and the `y` letter's case the
//! scanline direction. `"all"` expands to the full concrete set, `"auto"`
//! resolves to the default raster order `"xy"`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ExtractError, ExtractResult};

/// Traversal direction along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    Asc,
    Desc,
}

/// Raster axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// One concrete traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderToken {
    /// Pixel-major traversal: the inner axis varies fastest.
    Pixel {
        inner: Axis,
        inner_dir: Dir,
        outer_dir: Dir,
    },
    /// Byte-major traversal over raw scanline bytes.
    Byte { byte_dir: Dir, line_dir: Dir },
}

impl Default for OrderToken {
    /// The default raster order `"xy"`.
    fn default() -> Self {
        OrderToken::Pixel {
            inner: Axis::X,
            inner_dir: Dir::Asc,
            outer_dir: Dir::Asc,
        }
    }
}

impl OrderToken {
    /// Every supported concrete order, duplicate-free: eight pixel-major
    /// rasters followed by four byte-major walks. This is what the `"all"`
    /// wildcard expands to.
    pub const ALL: [OrderToken; 12] = [
        Self::pixel(Axis::X, Dir::Asc, Dir::Asc),   // xy
        Self::pixel(Axis::X, Dir::Asc, Dir::Desc),  // xY
        Self::pixel(Axis::X, Dir::Desc, Dir::Asc),  // Xy
        Self::pixel(Axis::X, Dir::Desc, Dir::Desc), // XY
        Self::pixel(Axis::Y, Dir::Asc, Dir::Asc),   // yx
        Self::pixel(Axis::Y, Dir::Asc, Dir::Desc),  // yX
        Self::pixel(Axis::Y, Dir::Desc, Dir::Asc),  // Yx
        Self::pixel(Axis::Y, Dir::Desc, Dir::Desc), // YX
        Self::byte(Dir::Asc, Dir::Asc),             // by
        Self::byte(Dir::Asc, Dir::Desc),            // bY
        Self::byte(Dir::Desc, Dir::Asc),            // By
        Self::byte(Dir::Desc, Dir::Desc),           // BY
    ];

    const fn pixel(inner: Axis, inner_dir: Dir, outer_dir: Dir) -> Self {
        OrderToken::Pixel {
            inner,
            inner_dir,
            outer_dir,
        }
    }

    const fn byte(byte_dir: Dir, line_dir: Dir) -> Self {
        OrderToken::Byte { byte_dir, line_dir }
    }

    /// Parse one concrete two-letter token such as `"xy"`, `"Yx"` or `"bY"`.
    ///
    /// `"yb"` spellings normalize to the canonical `b`-first form; pairing
    /// `b` with `x` is not a supported order.
    pub fn parse(token: &str) -> ExtractResult<Self> {
        let mut chars = token.chars();
        let (a, b) = match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => (a, b),
            _ => return Err(ExtractError::InvalidOrder(token.to_string())),
        };
        let dir = |c: char| {
            if c.is_ascii_uppercase() {
                Dir::Desc
            } else {
                Dir::Asc
            }
        };
        match (a.to_ascii_lowercase(), b.to_ascii_lowercase()) {
            ('x', 'y') => Ok(Self::pixel(Axis::X, dir(a), dir(b))),
            ('y', 'x') => Ok(Self::pixel(Axis::Y, dir(a), dir(b))),
            ('b', 'y') => Ok(Self::byte(dir(a), dir(b))),
            ('y', 'b') => Ok(Self::byte(dir(b), dir(a))),
            _ => Err(ExtractError::InvalidOrder(token.to_string())),
        }
    }

    /// Parse a comma-separated order option. `"all"` expands to the full
    /// concrete set (top level only, duplicate-free); `"auto"` resolves to
    /// the default raster order.
    pub fn parse_list(s: &str) -> ExtractResult<Vec<OrderToken>> {
        let mut out = Vec::new();
        let push = |t: OrderToken, out: &mut Vec<OrderToken>| {
            if !out.contains(&t) {
                out.push(t);
            }
        };
        for part in s.split(',') {
            if part.eq_ignore_ascii_case("all") {
                for t in Self::ALL {
                    push(t, &mut out);
                }
            } else if part.eq_ignore_ascii_case("auto") {
                push(Self::default(), &mut out);
            } else {
                push(Self::parse(part)?, &mut out);
            }
        }
        Ok(out)
    }

    /// Whether this order walks raw bytes rather than pixel coordinates.
    pub fn is_byte_major(&self) -> bool {
        matches!(self, OrderToken::Byte { .. })
    }

    /// Canonical spelling of this order.
    pub fn as_str(&self) -> &'static str {
        match *self {
            OrderToken::Pixel {
                inner: Axis::X,
                inner_dir,
                outer_dir,
            } => match (inner_dir, outer_dir) {
                (Dir::Asc, Dir::Asc) => "xy",
                (Dir::Asc, Dir::Desc) => "xY",
                (Dir::Desc, Dir::Asc) => "Xy",
                (Dir::Desc, Dir::Desc) => "XY",
            },
            OrderToken::Pixel {
                inner: Axis::Y,
                inner_dir,
                outer_dir,
            } => match (inner_dir, outer_dir) {
                (Dir::Asc, Dir::Asc) => "yx",
                (Dir::Asc, Dir::Desc) => "yX",
                (Dir::Desc, Dir::Asc) => "Yx",
                (Dir::Desc, Dir::Desc) => "YX",
            },
            OrderToken::Byte { byte_dir, line_dir } => match (byte_dir, line_dir) {
                (Dir::Asc, Dir::Asc) => "by",
                (Dir::Asc, Dir::Desc) => "bY",
                (Dir::Desc, Dir::Asc) => "By",
                (Dir::Desc, Dir::Desc) => "BY",
            },
        }
    }
}

impl fmt::Display for OrderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lazy cursor over pixel coordinates for a pixel-major order.
///
/// Deterministic, total and non-repeating; nothing is materialized, so an
/// extraction that stops after a handful of bytes only ever computes a
/// handful of coordinates.
#[derive(Debug, Clone)]
pub struct PixelCursor {
    width: u32,
    height: u32,
    inner: Axis,
    inner_dir: Dir,
    outer_dir: Dir,
    inner_pos: u32,
    outer_pos: u32,
    done: bool,
}

impl PixelCursor {
    pub fn new(width: u32, height: u32, inner: Axis, inner_dir: Dir, outer_dir: Dir) -> Self {
        Self {
            width,
            height,
            inner,
            inner_dir,
            outer_dir,
            inner_pos: 0,
            outer_pos: 0,
            done: width == 0 || height == 0,
        }
    }
}

impl Iterator for PixelCursor {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        if self.done {
            return None;
        }
        let (inner_len, outer_len) = match self.inner {
            Axis::X => (self.width, self.height),
            Axis::Y => (self.height, self.width),
        };
        let iv = match self.inner_dir {
            Dir::Asc => self.inner_pos,
            Dir::Desc => inner_len - 1 - self.inner_pos,
        };
        let ov = match self.outer_dir {
            Dir::Asc => self.outer_pos,
            Dir::Desc => outer_len - 1 - self.outer_pos,
        };
        let coord = match self.inner {
            Axis::X => (iv, ov),
            Axis::Y => (ov, iv),
        };
        self.inner_pos += 1;
        if self.inner_pos == inner_len {
            self.inner_pos = 0;
            self.outer_pos += 1;
            if self.outer_pos == outer_len {
                self.done = true;
            }
        }
        Some(coord)
    }
}

/// Lazy cursor over raw buffer offsets for a byte-major order.
///
/// Walks scanline by scanline; a buffer whose length is not a stride
/// multiple simply gets a short final scanline.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    len: usize,
    stride: usize,
    byte_dir: Dir,
    line_dir: Dir,
    line: usize,
    pos: usize,
    done: bool,
}

impl ByteCursor {
    pub fn new(len: usize, stride: usize, byte_dir: Dir, line_dir: Dir) -> Self {
        Self {
            len,
            stride: stride.max(1),
            byte_dir,
            line_dir,
            line: 0,
            pos: 0,
            done: len == 0,
        }
    }

    fn line_count(&self) -> usize {
        self.len.div_ceil(self.stride)
    }
}

impl Iterator for ByteCursor {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let lines = self.line_count();
        let li = match self.line_dir {
            Dir::Asc => self.line,
            Dir::Desc => lines - 1 - self.line,
        };
        let start = li * self.stride;
        let line_len = self.stride.min(self.len - start);
        let offset = match self.byte_dir {
            Dir::Asc => start + self.pos,
            Dir::Desc => start + line_len - 1 - self.pos,
        };
        self.pos += 1;
        if self.pos == line_len {
            self.pos = 0;
            self.line += 1;
            if self.line == lines {
                self.done = true;
            }
        }
        Some(offset)
    }
}
