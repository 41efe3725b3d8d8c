use crate::kmlib::{ClusterError, PointStore, Result};
use std::{
    fs::File,
    io::{self, BufRead},
    path::{Path, PathBuf},
};

type FileHandler = io::Result<io::Lines<io::BufReader<File>>>;

fn read_lines<P>(filename: P) -> FileHandler
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

pub struct PointParser {
    /* Reads `x y` pairs separated by tabs, spaces or a comma.
    Blank lines and lines starting with # are skipped. Extra columns are ignored */
    file: PathBuf,
}

impl PointParser {
    pub fn new(path: &Path) -> Self {
        Self {
            file: path.to_path_buf(),
        }
    }

    pub fn parse(&self) -> Result<PointStore> {
        let mut store = PointStore::new();
        for (lineno, line) in read_lines(&self.file)?.enumerate() {
            let line = line?;
            if let Some((x, y)) = parse_line(&line, lineno + 1)? {
                store.add(x, y);
            }
        }
        debug!("read {} points from {}", store.len(), self.file.display());
        Ok(store)
    }
}

fn parse_line(line: &str, lineno: usize) -> Result<Option<(f64, f64)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let collection: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if collection.len() < 2 {
        return Err(ClusterError::Parse {
            line: lineno,
            message: format!("expected two coordinates, found `{}`", line),
        });
    }

    let coord = |s: &str| -> Result<f64> {
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ClusterError::Parse {
                line: lineno,
                message: format!("`{}` is not a finite number", s),
            }),
        }
    };
    Ok(Some((coord(collection[0])?, coord(collection[1])?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parses_mixed_separators() {
        let f = write("# clicks\n0\t0\n0 1\n\n10,10\n10.5  11 extra\n");
        let store = PointParser::new(f.path()).parse().unwrap();
        let xy: Vec<(f64, f64)> = store.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(xy, vec![(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.5, 11.0)]);
    }

    #[test]
    fn reports_bad_line() {
        let f = write("1 2\n3\n");
        match PointParser::new(f.path()).parse() {
            Err(ClusterError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_nan() {
        let f = write("nan 2\n");
        assert!(matches!(
            PointParser::new(f.path()).parse(),
            Err(ClusterError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_io() {
        let r = PointParser::new(Path::new("/no/such/file.tsv")).parse();
        assert!(matches!(r, Err(ClusterError::Io(_))));
    }
}
