//! The fragment mini-language: `#<anchor>;<event>;<param1>;<param2>;...`.
//!
//! The anchor is kept exactly as it appears in the URI. The event name and every
//! parameter are escaped with the legacy browser `escape` scheme and decoded on
//! parse, so arbitrary text survives a trip through the address bar.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

/// Structured interpretation of one URI fragment.
///
/// Two descriptors are equal when their anchor, event and every parameter match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FragmentDescriptor {
    anchor: Option<String>,
    event: Option<String>,
    params: Vec<String>,
}

impl FragmentDescriptor {
    /// Creates an empty descriptor: no anchor, no event, no parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            anchor: None,
            event: None,
            params: Vec::new(),
        }
    }

    /// Sets the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Sets the event name.
    #[must_use]
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Replaces the parameter list.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// The raw anchor, if the URI had a fragment.
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// The decoded event name.
    #[must_use]
    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// The decoded parameters, in URI order.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Renders `;<event>;<param>...` with every token escaped.
    ///
    /// Appending the result to a URI whose fragment holds only an anchor
    /// re-attaches this descriptor's event. Returns an empty string when no
    /// event is set.
    #[must_use]
    pub fn to_fragment_suffix(&self) -> String {
        let mut suffix = String::new();
        if let Some(event) = &self.event {
            suffix.push(';');
            suffix.push_str(&escape(event));
            for param in &self.params {
                suffix.push(';');
                suffix.push_str(&escape(param));
            }
        }
        suffix
    }
}

/// Parses `uri` into a [`FragmentDescriptor`]. Never fails.
///
/// A URI without `#`, or whose only `#` sits at index 0, yields the empty
/// descriptor.
///
/// ```
/// use hashnav_core::parse_uri;
///
/// let descriptor = parse_uri("page.html#top;login;user1;pass2");
/// assert_eq!(descriptor.anchor(), Some("top"));
/// assert_eq!(descriptor.event(), Some("login"));
/// assert_eq!(descriptor.params(), ["user1", "pass2"]);
/// ```
#[must_use]
pub fn parse_uri(uri: &str) -> FragmentDescriptor {
    let fragment = match uri.find('#') {
        Some(index) if index > 0 => &uri[index + 1..],
        _ => return FragmentDescriptor::new(),
    };

    let mut slices = fragment.split(';');
    let anchor = slices.next().map(String::from);
    let event = slices.next().map(unescape);
    let params = if event.is_some() {
        slices.map(unescape).collect()
    } else {
        Vec::new()
    };

    FragmentDescriptor {
        anchor,
        event,
        params,
    }
}

// ============================================================================
// Legacy escape / unescape
// ============================================================================

const fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'@' | b'*' | b'_' | b'+' | b'-' | b'.' | b'/')
}

/// Escapes `input` the way the browser's legacy `escape` function does.
///
/// Works on UTF-16 code units: units below `0x100` become `%XX`, everything
/// else becomes `%uXXXX`.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for unit in input.encode_utf16() {
        match u8::try_from(unit) {
            Ok(byte) if is_unreserved(byte) => output.push(char::from(byte)),
            Ok(byte) => {
                let _ = write!(output, "%{byte:02X}");
            }
            Err(_) => {
                let _ = write!(output, "%u{unit:04X}");
            }
        }
    }
    output
}

fn hex_value(byte: u8) -> Option<u16> {
    char::from(byte)
        .to_digit(16)
        .and_then(|digit| u16::try_from(digit).ok())
}

fn hex_run(bytes: &[u8]) -> Option<u16> {
    bytes
        .iter()
        .try_fold(0u16, |acc, &byte| Some((acc << 4) | hex_value(byte)?))
}

/// Reverses [`escape`]. Malformed `%` sequences are kept literally.
///
/// Decoded unpaired surrogates are replaced with U+FFFD.
#[must_use]
pub fn unescape(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut units: Vec<u16> = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'%' {
            if bytes.get(pos + 1) == Some(&b'u')
                && let Some(unit) = bytes.get(pos + 2..pos + 6).and_then(hex_run)
            {
                units.push(unit);
                pos += 6;
                continue;
            }
            if let Some(unit) = bytes.get(pos + 1..pos + 3).and_then(hex_run) {
                units.push(unit);
                pos += 3;
                continue;
            }
        }

        // Copy one literal character, which may span several bytes.
        let rest = &input[pos..];
        let Some(ch) = rest.chars().next() else { break };
        let mut buffer = [0u16; 2];
        units.extend_from_slice(ch.encode_utf16(&mut buffer));
        pos += ch.len_utf8();
    }

    String::from_utf16_lossy(&units)
}
