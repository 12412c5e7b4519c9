//! Unified diff data model, parser and canonical formatter.
//!
//! The formatter is the single source of patch bytes for the whole crate:
//! generation and reject files both go through it, which is what makes
//! regenerated patches byte-identical. Headers carry no timestamps.

use super::PatchError;

/// Path used in headers for a created or deleted file.
pub const DEV_NULL: &str = "/dev/null";

/// Kind of a single patch body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Context,
    Add,
    Remove,
}

/// One body line. `text` excludes the trailing newline; `no_newline` marks
/// a line that ends the file without one (`\ No newline at end of file`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchLine {
    pub kind: LineKind,
    pub text: String,
    pub no_newline: bool,
}

impl PatchLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        PatchLine {
            kind,
            text: text.into(),
            no_newline: false,
        }
    }
}

/// One hunk: a contiguous region of context/add/remove lines with its
/// 1-based start positions and line counts in the old and new file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<PatchLine>,
}

impl Hunk {
    /// The old-file lines this hunk expects (context + removals).
    pub fn old_lines(&self) -> impl Iterator<Item = &PatchLine> {
        self.lines
            .iter()
            .filter(|l| l.kind != LineKind::Add)
    }

    /// The new-file lines this hunk produces (context + additions).
    pub fn new_lines(&self) -> impl Iterator<Item = &PatchLine> {
        self.lines
            .iter()
            .filter(|l| l.kind != LineKind::Remove)
    }
}

/// A parsed patch for one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Relative path of the original file (`a/` prefix stripped).
    pub old_path: String,
    /// Relative path of the patched file, or [`DEV_NULL`] for a deletion.
    pub new_path: String,
    pub hunks: Vec<Hunk>,
}

impl Patch {
    /// Whether this patch deletes the target file.
    pub fn is_deletion(&self) -> bool {
        self.new_path == DEV_NULL
    }
}

fn strip_prefix(path: &str) -> &str {
    if path == DEV_NULL {
        return path;
    }
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
}

/// Parse `@@ -old_start[,old_count] +new_start[,new_count] @@`.
fn parse_hunk_header(line: &str, lineno: usize) -> Result<(usize, usize, usize, usize), PatchError> {
    let malformed = || PatchError::MalformedHunkHeader {
        line: lineno,
        text: line.to_string(),
    };

    let body = line
        .strip_prefix("@@ -")
        .and_then(|rest| rest.split(" @@").next())
        .ok_or_else(malformed)?;
    let (old, new) = body.split_once(" +").ok_or_else(malformed)?;

    let parse_range = |s: &str| -> Result<(usize, usize), PatchError> {
        match s.split_once(',') {
            Some((start, count)) => Ok((
                start.parse().map_err(|_| malformed())?,
                count.parse().map_err(|_| malformed())?,
            )),
            None => Ok((s.parse().map_err(|_| malformed())?, 1)),
        }
    };

    let (old_start, old_count) = parse_range(old)?;
    let (new_start, new_count) = parse_range(new)?;
    Ok((old_start, old_count, new_start, new_count))
}

/// Parse a unified diff for a single file.
///
/// Leading lines before the `---` header (comments, generator noise) are
/// ignored. Hunk bodies are validated against the counts declared in the
/// hunk header.
pub fn parse(text: &str) -> Result<Patch, PatchError> {
    let mut lines = text.lines().enumerate().peekable();

    // Skip to the file header.
    let old_path = loop {
        match lines.next() {
            Some((_, line)) if line.starts_with("--- ") => {
                break strip_prefix(line[4..].trim()).to_string();
            }
            Some(_) => continue,
            None => return Err(PatchError::MissingHeader),
        }
    };

    let new_path = match lines.next() {
        Some((_, line)) if line.starts_with("+++ ") => strip_prefix(line[4..].trim()).to_string(),
        _ => return Err(PatchError::MissingHeader),
    };

    let mut hunks = Vec::new();
    while let Some((lineno, line)) = lines.next() {
        if line.is_empty() {
            continue;
        }
        if !line.starts_with("@@") {
            return Err(PatchError::UnexpectedLine {
                line: lineno + 1,
                text: line.to_string(),
            });
        }

        let (old_start, old_count, new_start, new_count) = parse_hunk_header(line, lineno + 1)?;
        let header_line = lineno + 1;
        let mut hunk = Hunk {
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        };

        let mut old_seen = 0;
        let mut new_seen = 0;
        while old_seen < old_count || new_seen < new_count {
            let (lineno, line) = lines
                .next()
                .ok_or(PatchError::TruncatedHunk { line: header_line })?;

            let (kind, text) = match line.chars().next() {
                Some(' ') => (LineKind::Context, &line[1..]),
                Some('+') => (LineKind::Add, &line[1..]),
                Some('-') => (LineKind::Remove, &line[1..]),
                // Tolerate a fully empty line as empty context; some tools
                // strip the single leading space.
                None => (LineKind::Context, ""),
                Some('\\') => {
                    if let Some(last) = hunk.lines.last_mut() {
                        last.no_newline = true;
                    }
                    continue;
                }
                _ => {
                    return Err(PatchError::UnexpectedLine {
                        line: lineno + 1,
                        text: line.to_string(),
                    })
                }
            };

            match kind {
                LineKind::Context => {
                    old_seen += 1;
                    new_seen += 1;
                }
                LineKind::Add => new_seen += 1,
                LineKind::Remove => old_seen += 1,
            }
            hunk.lines.push(PatchLine::new(kind, text));
        }

        // A trailing `\ No newline` after the last counted line.
        if let Some(&(_, line)) = lines.peek() {
            if line.starts_with('\\') {
                if let Some(last) = hunk.lines.last_mut() {
                    last.no_newline = true;
                }
                lines.next();
            }
        }

        hunks.push(hunk);
    }

    Ok(Patch {
        old_path,
        new_path,
        hunks,
    })
}

/// Render one hunk in canonical form.
pub fn format_hunk(hunk: &Hunk, out: &mut String) {
    out.push_str(&format!(
        "@@ -{},{} +{},{} @@\n",
        hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
    ));
    for line in &hunk.lines {
        out.push(match line.kind {
            LineKind::Context => ' ',
            LineKind::Add => '+',
            LineKind::Remove => '-',
        });
        out.push_str(&line.text);
        out.push('\n');
        if line.no_newline {
            out.push_str("\\ No newline at end of file\n");
        }
    }
}

/// Render a whole patch in canonical form: `a/`/`b/` prefixed headers, no
/// timestamps, counts always explicit.
pub fn format(patch: &Patch) -> String {
    let mut out = String::new();
    out.push_str(&format!("--- a/{}\n", patch.old_path));
    if patch.is_deletion() {
        out.push_str(&format!("+++ {DEV_NULL}\n"));
    } else {
        out.push_str(&format!("+++ b/{}\n", patch.new_path));
    }
    for hunk in &patch.hunks {
        format_hunk(hunk, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "--- a/net/minecraft/Foo.java\n\
        +++ b/net/minecraft/Foo.java\n\
        @@ -1,3 +1,4 @@\n\
        \x20class Foo {\n\
        +    int added;\n\
        \x20    int kept;\n\
        \x20}\n";

    #[test]
    fn test_parse_basic() {
        let patch = parse(SAMPLE).unwrap();
        assert_eq!(patch.old_path, "net/minecraft/Foo.java");
        assert_eq!(patch.new_path, "net/minecraft/Foo.java");
        assert_eq!(patch.hunks.len(), 1);

        let hunk = &patch.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (1, 3));
        assert_eq!((hunk.new_start, hunk.new_count), (1, 4));
        assert_eq!(hunk.lines[1].kind, LineKind::Add);
        assert_eq!(hunk.lines[1].text, "    int added;");
    }

    #[test]
    fn test_format_round_trip() {
        let patch = parse(SAMPLE).unwrap();
        assert_eq!(format(&patch), SAMPLE);
        assert_eq!(parse(&format(&patch)).unwrap(), patch);
    }

    #[test]
    fn test_no_newline_marker() {
        let text = "--- a/x.txt\n+++ b/x.txt\n@@ -1,1 +1,1 @@\n-old\n+new\n\\ No newline at end of file\n";
        let patch = parse(text).unwrap();
        let add = &patch.hunks[0].lines[1];
        assert!(add.no_newline);
        assert_eq!(format(&patch), text);
    }

    #[test]
    fn test_deletion_header() {
        let text = "--- a/gone.java\n+++ /dev/null\n@@ -1,1 +0,0 @@\n-content\n";
        let patch = parse(text).unwrap();
        assert!(patch.is_deletion());
        assert_eq!(format(&patch), text);
    }

    #[test]
    fn test_skips_leading_noise() {
        let text = format!("some header comment\n{SAMPLE}");
        assert!(parse(&text).is_ok());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse("no diff here\n"), Err(PatchError::MissingHeader)));
        assert!(matches!(
            parse("--- a/x\n+++ b/x\n@@ nonsense @@\n"),
            Err(PatchError::MalformedHunkHeader { .. })
        ));
        assert!(matches!(
            parse("--- a/x\n+++ b/x\n@@ -1,2 +1,2 @@\n old\n"),
            Err(PatchError::TruncatedHunk { .. })
        ));
    }
}
