//! The lmhosts file parser collaborator contract (spec §1/§6). Maintaining
//! or fully parsing the lmhosts file format is out of scope; this module
//! defines the trait the lmhosts adapter (component I) consumes plus a
//! minimal line-oriented reader (`name  addr`, `#`-comments, blank lines
//! skipped) for the one test that exercises a real file.

use std::fs;
use std::net::IpAddr;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LmhostsEntry {
    pub name: String,
    pub suffix: u8,
    pub addr: IpAddr,
}

pub trait LmhostsSource: Send + Sync {
    fn entries(&self) -> std::io::Result<Vec<LmhostsEntry>>;
}

/// Test double holding entries directly in memory.
#[derive(Default, Clone)]
pub struct StaticLmhosts {
    pub entries: Vec<LmhostsEntry>,
}

impl LmhostsSource for StaticLmhosts {
    fn entries(&self) -> std::io::Result<Vec<LmhostsEntry>> {
        Ok(self.entries.clone())
    }
}

/// Reads `name addr [suffix-hex]` lines from a real file. When the suffix
/// column is absent, entries match [`crate::name::SUFFIX_WORKSTATION`] and
/// [`crate::name::SUFFIX_SERVER`] both (lmhosts historically has no suffix
/// column at all; callers filter by suffix downstream per spec §4.I).
pub struct FileLmhosts {
    pub path: std::path::PathBuf,
}

impl FileLmhosts {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl LmhostsSource for FileLmhosts {
    fn entries(&self) -> std::io::Result<Vec<LmhostsEntry>> {
        let contents = fs::read_to_string(&self.path)?;
        let mut out = Vec::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(addr_str), Some(name)) = (fields.next(), fields.next()) else {
                continue;
            };
            let Ok(addr) = addr_str.parse::<IpAddr>() else {
                continue;
            };
            let suffix = fields.next().and_then(|s| u8::from_str_radix(s.trim_start_matches("0x"), 16).ok());

            match suffix {
                Some(suffix) => out.push(LmhostsEntry { name: name.to_string(), suffix, addr }),
                None => {
                    out.push(LmhostsEntry { name: name.to_string(), suffix: crate::name::SUFFIX_WORKSTATION, addr });
                    out.push(LmhostsEntry { name: name.to_string(), suffix: crate::name::SUFFIX_SERVER, addr });
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_lmhosts_parses_lines_and_skips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# a comment").unwrap();
        writeln!(file, "192.168.1.20   DC01   0x1b").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "192.168.1.21   FILESRV").unwrap();

        let src = FileLmhosts::new(file.path());
        let entries = src.entries().unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "DC01");
        assert_eq!(entries[0].suffix, 0x1b);
        assert!(entries.iter().any(|e| e.name == "FILESRV" && e.suffix == crate::name::SUFFIX_SERVER));
    }
}
