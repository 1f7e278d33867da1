//! XHTML-safe text and attribute escaping.
//!
//! Two output contexts exist: element content (`&`, `<`, `>`) and attribute
//! values (additionally `"` and `'`). Escaping is streaming — unescaped runs
//! are written in bulk, with `memchr` locating the next markup-significant
//! byte. Markup-significant characters are all ASCII, so scanning bytes is
//! safe regardless of UTF-8 boundaries.

use std::io::{self, Write};

use memchr::{memchr2, memchr3};

/// Escape `text` for element content and write it to `out`.
pub fn escape_text_into<W: Write + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    escape_into(out, text.as_bytes(), false)
}

/// Escape `text` for an attribute value and write it to `out`.
pub fn escape_attr_into<W: Write + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    escape_into(out, text.as_bytes(), true)
}

fn escape_into<W: Write + ?Sized>(out: &mut W, bytes: &[u8], attr: bool) -> io::Result<()> {
    let mut rest = bytes;
    loop {
        let text_hit = memchr3(b'&', b'<', b'>', rest);
        let attr_hit = if attr { memchr2(b'"', b'\'', rest) } else { None };
        let pos = match (text_hit, attr_hit) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => break,
        };
        out.write_all(&rest[..pos])?;
        let entity: &[u8] = match rest[pos] {
            b'&' => b"&amp;",
            b'<' => b"&lt;",
            b'>' => b"&gt;",
            b'"' => b"&quot;",
            _ => b"&#39;",
        };
        out.write_all(entity)?;
        rest = &rest[pos + 1..];
    }
    out.write_all(rest)
}

/// `io::Write` adapter that attribute-escapes everything written through it.
///
/// Hands collaborators a sink they can write raw values into while the
/// surrounding code stays in an attribute-value context (e.g. the anchor
/// index writing a resolved id between `id="` and `"`).
pub struct AttrWriter<W: Write> {
    inner: W,
}

impl<W: Write> AttrWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for AttrWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        escape_into(&mut self.inner, buf, true)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
