use crate::error::{JsopError, JsopResult};
use crate::op::PatchOp;

/// Parse patch text into its operations.
///
/// Raw payload and scalar text is captured verbatim; only path tokens are
/// decoded. Whitespace between operations is tolerated, inside an operation
/// the compact form is required.
pub fn parse(text: &str) -> JsopResult<Vec<PatchOp>> {
    let mut scanner = Scanner::new(text);
    let mut ops = Vec::new();

    loop {
        scanner.skip_ws();
        let Some(op_char) = scanner.bump() else {
            return Ok(ops);
        };
        match op_char {
            b'+' => {
                let path = scanner.path_token()?;
                scanner.expect(b':')?;
                let payload_pos = scanner.pos;
                let payload = scanner.raw_value()?;
                if !payload.starts_with('{') {
                    return Err(JsopError::MalformedValue {
                        pos: payload_pos,
                        detail: "node payload must be an object".to_string(),
                    });
                }
                ops.push(PatchOp::AddNode {
                    path,
                    payload: payload.to_string(),
                });
            }
            b'-' => {
                let path = scanner.path_token()?;
                ops.push(PatchOp::RemoveNode { path });
            }
            b'^' => {
                let path = scanner.path_token()?;
                scanner.expect(b':')?;
                let value = scanner.raw_value()?.to_string();
                ops.push(PatchOp::SetProperty { path, value });
            }
            b'>' => {
                let old_path = scanner.path_token()?;
                scanner.expect(b':')?;
                let new_path = scanner.path_token()?;
                ops.push(PatchOp::MoveNode { old_path, new_path });
            }
            b'*' => {
                let old_path = scanner.path_token()?;
                scanner.expect(b':')?;
                let new_path = scanner.path_token()?;
                ops.push(PatchOp::CopyNode { old_path, new_path });
            }
            other => {
                return Err(JsopError::UnexpectedChar {
                    ch: other as char,
                    pos: scanner.pos - 1,
                });
            }
        }
    }
}

/// Byte-position scanner over patch text.
///
/// Scanning is byte-wise; the bytes looked for (quotes, brackets, digits)
/// never occur as UTF-8 continuation bytes, and slices are only taken at
/// token boundaries.
struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: u8) -> JsopResult<()> {
        match self.bump() {
            Some(byte) if byte == expected => Ok(()),
            Some(byte) => Err(JsopError::UnexpectedChar {
                ch: byte as char,
                pos: self.pos - 1,
            }),
            None => Err(JsopError::UnexpectedEnd),
        }
    }

    /// Scan a quoted string and return its raw text, quotes included.
    fn string_token(&mut self) -> JsopResult<&'a str> {
        let start = self.pos;
        self.expect(b'"')?;
        loop {
            match self.bump() {
                Some(b'"') => return Ok(&self.src[start..self.pos]),
                Some(b'\\') => {
                    if self.bump().is_none() {
                        return Err(JsopError::UnterminatedString { pos: start });
                    }
                }
                Some(_) => {}
                None => return Err(JsopError::UnterminatedString { pos: start }),
            }
        }
    }

    /// Scan a quoted path token and decode its escapes.
    fn path_token(&mut self) -> JsopResult<String> {
        let start = self.pos;
        let token = self.string_token()?;
        serde_json::from_str(token).map_err(|e| JsopError::MalformedValue {
            pos: start,
            detail: e.to_string(),
        })
    }

    /// Scan one raw JSON value and return its text verbatim.
    fn raw_value(&mut self) -> JsopResult<&'a str> {
        let start = self.pos;
        match self.peek().ok_or(JsopError::UnexpectedEnd)? {
            b'"' => {
                self.string_token()?;
            }
            b'{' | b'[' => self.balanced()?,
            b'-' | b'0'..=b'9' => self.number()?,
            b't' => self.literal("true")?,
            b'f' => self.literal("false")?,
            b'n' => self.literal("null")?,
            other => {
                return Err(JsopError::UnexpectedChar {
                    ch: other as char,
                    pos: self.pos,
                });
            }
        }
        Ok(&self.src[start..self.pos])
    }

    /// Scan a bracketed payload, matching every opener with its closer and
    /// skipping over string contents.
    fn balanced(&mut self) -> JsopResult<()> {
        let start = self.pos;
        let mut open = Vec::new();
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.string_token()?;
                }
                Some(byte @ (b'{' | b'[')) => {
                    open.push(byte);
                    self.pos += 1;
                }
                Some(byte @ (b'}' | b']')) => {
                    let opener = if byte == b'}' { b'{' } else { b'[' };
                    if open.pop() != Some(opener) {
                        return Err(JsopError::UnbalancedPayload { pos: start });
                    }
                    self.pos += 1;
                    if open.is_empty() {
                        return Ok(());
                    }
                }
                Some(_) => self.pos += 1,
                None => return Err(JsopError::UnbalancedPayload { pos: start }),
            }
        }
    }

    /// Scan a complete JSON number so a following operation character is
    /// left untouched.
    fn number(&mut self) -> JsopResult<()> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        if self.digits() == 0 {
            return Err(JsopError::MalformedValue {
                pos: start,
                detail: "expected digits".to_string(),
            });
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if self.digits() == 0 {
                return Err(JsopError::MalformedValue {
                    pos: start,
                    detail: "expected fraction digits".to_string(),
                });
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                return Err(JsopError::MalformedValue {
                    pos: start,
                    detail: "expected exponent digits".to_string(),
                });
            }
        }
        Ok(())
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn literal(&mut self, literal: &'static str) -> JsopResult<()> {
        if self.src[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(JsopError::MalformedValue {
                pos: self.pos,
                detail: format!("expected {literal}"),
            })
        }
    }
}
