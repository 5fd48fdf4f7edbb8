// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! XML property list with colliding keys.
//!
//! Loading such a file inserts every key into one dictionary, so a native
//! dictionary hashing with the rolling hash degrades to linear probing.

use std::io::{self, Write};

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
    "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    "<plist version=\"1.0\">\n",
    "<dict>\n"
);

const FOOTER: &str = "</dict>\n</plist>\n";

/// Write a property list mapping every key to `YES`.
///
/// Returns the number of keys written.
pub fn write_plist<W, I>(out: &mut W, keys: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    out.write_all(HEADER.as_bytes())?;
    let mut count = 0;
    for key in keys {
        out.write_all(b"<key>")?;
        write_escaped(out, key.as_ref())?;
        out.write_all(b"</key>\n<string>YES</string>\n")?;
        count += 1;
    }
    out.write_all(FOOTER.as_bytes())?;
    Ok(count)
}

fn write_escaped<W: Write>(out: &mut W, text: &[u8]) -> io::Result<()> {
    for &byte in text {
        match byte {
            b'&' => out.write_all(b"&amp;")?,
            b'<' => out.write_all(b"&lt;")?,
            b'>' => out.write_all(b"&gt;")?,
            b'"' => out.write_all(b"&quot;")?,
            b'\'' => out.write_all(b"&apos;")?,
            _ => out.write_all(&[byte])?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_shape() {
        let mut out = Vec::new();
        let count = write_plist(&mut out, [b"ab".to_vec(), b"cd".to_vec()]).unwrap();
        assert_eq!(count, 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE plist"));
        assert!(text.contains("<dict>\n<key>ab</key>\n<string>YES</string>\n<key>cd</key>"));
        assert!(text.ends_with("</dict>\n</plist>\n"));
    }

    #[test]
    fn test_keys_are_escaped() {
        let mut out = Vec::new();
        write_plist(&mut out, [&b"<&\"'>"[..]]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<key>&lt;&amp;&quot;&apos;&gt;</key>"));
    }

    #[test]
    fn test_empty_dictionary() {
        let mut out = Vec::new();
        let keys: [&[u8]; 0] = [];
        assert_eq!(write_plist(&mut out, keys).unwrap(), 0);
        assert!(String::from_utf8(out).unwrap().contains("<dict>\n</dict>"));
    }
}
