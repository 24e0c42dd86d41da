use crate::op::PatchOp;

/// Incremental encoder for the patch grammar.
///
/// Operations are appended with no separator between them; path tokens get
/// standard JSON string quoting, raw payload and scalar text is emitted
/// untouched.
#[derive(Debug, Default)]
pub struct PatchBuilder {
    out: String,
}

impl PatchBuilder {
    /// Start an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one operation.
    pub fn push(&mut self, op: &PatchOp) -> &mut Self {
        match op {
            PatchOp::AddNode { path, payload } => {
                self.out.push('+');
                self.out.push_str(&quote(path));
                self.out.push(':');
                self.out.push_str(payload);
            }
            PatchOp::RemoveNode { path } => {
                self.out.push('-');
                self.out.push_str(&quote(path));
            }
            PatchOp::SetProperty { path, value } => {
                self.out.push('^');
                self.out.push_str(&quote(path));
                self.out.push(':');
                self.out.push_str(value);
            }
            PatchOp::MoveNode { old_path, new_path } => {
                self.out.push('>');
                self.out.push_str(&quote(old_path));
                self.out.push(':');
                self.out.push_str(&quote(new_path));
            }
            PatchOp::CopyNode { old_path, new_path } => {
                self.out.push('*');
                self.out.push_str(&quote(old_path));
                self.out.push(':');
                self.out.push_str(&quote(new_path));
            }
        }
        self
    }

    /// The accumulated patch text.
    pub fn finish(self) -> String {
        self.out
    }
}

/// Encode a sequence of operations as patch text.
pub fn encode(ops: &[PatchOp]) -> String {
    let mut builder = PatchBuilder::new();
    for op in ops {
        builder.push(op);
    }
    builder.finish()
}

/// JSON string quoting for a path token.
fn quote(path: &str) -> String {
    serde_json::Value::from(path).to_string()
}
