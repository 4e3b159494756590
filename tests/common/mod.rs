#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch dump directory that cleans up on drop.
pub struct DumpWorkspace {
    temp_dir: TempDir,
}

impl DumpWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `<label>.xml` with the usual declaration, root element and
    /// closing tag around the given record lines.
    pub fn write_table(&self, label: &str, rows: &[&str]) -> PathBuf {
        let root = label.to_lowercase();
        let mut contents = format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<{root}>\n");
        for row in rows {
            contents.push_str("  ");
            contents.push_str(row);
            contents.push('\n');
        }
        contents.push_str(&format!("</{root}>\n"));
        self.write(&format!("{label}.xml"), &contents)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }
}

/// A small Stack Exchange style dump: users, posts, comments and votes.
pub fn stackexchange_dump() -> DumpWorkspace {
    let workspace = DumpWorkspace::new();
    workspace.write_table(
        "Users",
        &[
            r#"<row Id="1" Reputation="101" CreationDate="2010-07-19T06:55:26.860" DisplayName="Ann" IsModerator="True" />"#,
            r#"<row Id="2" Reputation="1" CreationDate="2010-07-19T07:01:12.000" DisplayName="Bob O'Neil" Location="" IsModerator="False" />"#,
        ],
    );
    workspace.write_table(
        "Posts",
        &[
            r#"<row Id="1" PostTypeId="1" CreationDate="2010-07-19T19:12:12.510" Score="5" Body="&lt;p&gt;Why?&lt;/p&gt;" OwnerUserId="1" />"#,
            r#"<row Id="2" PostTypeId="2" ParentId="1" CreationDate="2010-07-19T19:15:00.000" Score="3" Body="Because" OwnerUserId="2" />"#,
        ],
    );
    workspace.write_table(
        "Comments",
        &[
            r#"<row Id="1" PostId="1" Score="0" Text="Nice" UserId="2" />"#,
            r#"<row Id="2" PostId="9" Score="1" Text="Orphan" UserId="1" />"#,
        ],
    );
    workspace.write_table(
        "Votes",
        &[r#"<row Id="1" PostId="1" VoteTypeId="2" CreationDate="2010-07-19" />"#],
    );
    workspace
}
