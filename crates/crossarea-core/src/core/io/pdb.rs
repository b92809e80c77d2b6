use super::radii::RadiusLibrary;
use super::traits::StructureFile;
use crate::core::models::atom_set::{AtomSet, AtomSetError};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("No radius for element '{element}' (line {line})")]
    UnknownElement { line: usize, element: String },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Invalid structure: {0}")]
    AtomSet(#[from] AtomSetError),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("Cannot determine element from atom name '{0}'")]
    UnresolvedElement(String),
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Element symbol from columns 77-78, or the leading letters of the atom name when blank.
///
/// `HETATM` names such as `CL1` or `FE` keep a two-letter symbol when the library knows it.
/// `ATOM` names are always read as one letter, so `CA` stays an alpha carbon.
fn element_symbol(line: &str, hetero: bool, radii: &RadiusLibrary) -> Option<String> {
    let element = slice_and_trim(line, 76, 78);
    if !element.is_empty() {
        return Some(element.to_string());
    }
    let name = slice_and_trim(line, 12, 16);
    let letters: String = name
        .chars()
        .skip_while(|c| c.is_ascii_digit())
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    letters
        .get(..2)
        .filter(|pair| hetero && radii.get(pair).is_some())
        .or_else(|| letters.get(..1))
        .map(str::to_string)
}

/// Reader for the `ATOM`/`HETATM` records of a Protein Data Bank file.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead, radii: &RadiusLibrary) -> Result<AtomSet, PdbError> {
        let mut coords = Vec::new();
        let mut atom_radii = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                record @ ("ATOM" | "HETATM") => {
                    if line.len() < 54 {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }
                    let x = parse_coordinate(&line, line_num, 30, 38)?;
                    let y = parse_coordinate(&line, line_num, 38, 46)?;
                    let z = parse_coordinate(&line, line_num, 46, 54)?;

                    let element = element_symbol(&line, record == "HETATM", radii).ok_or_else(|| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::UnresolvedElement(
                            slice_and_trim(&line, 12, 16).to_string(),
                        ),
                    })?;
                    let radius = radii
                        .get(&element)
                        .ok_or(PdbError::UnknownElement {
                            line: line_num,
                            element,
                        })?;

                    coords.push(Point3::new(x, y, z));
                    atom_radii.push(radius);
                }
                "END" | "ENDMDL" => break,
                _ => {}
            }
        }

        if coords.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok(AtomSet::centered(coords, atom_radii)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    const TWO_ATOMS: &str = "\
HEADER    TEST
ATOM      1  N   ALA A   1      11.000  10.000  10.000  1.00  0.00           N
ATOM      2  CA  ALA A   1      13.000  10.000  10.000  1.00  0.00
END
ATOM      3  C   ALA A   1      99.000  99.000  99.000  1.00  0.00           C
";

    fn library() -> RadiusLibrary {
        let mut library = RadiusLibrary::new();
        library.insert("N", 1.55);
        library.insert("C", 1.70);
        library
    }

    #[test]
    fn reads_atoms_until_end_and_centres_them() {
        let set = PdbFile::read_from(&mut Cursor::new(TWO_ATOMS), &library()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.radii(), &[1.55, 1.70]);
        assert!((set.coords()[0].x + 1.0).abs() < 1e-9);
        assert!((set.coords()[1].x - 1.0).abs() < 1e-9);
        assert!((set.box_side() - 2.0).abs() < 1e-9);
        assert!((set.largest_radius() - 1.70).abs() < 1e-9);
    }

    #[test]
    fn element_falls_back_to_atom_name() {
        let line = "ATOM      2  CA  ALA A   1      13.000  10.000  10.000  1.00  0.00";
        assert_eq!(element_symbol(line, false, &library()).as_deref(), Some("C"));
        let line = "ATOM      2 1HB  ALA A   1      13.000  10.000  10.000  1.00  0.00";
        assert_eq!(element_symbol(line, false, &library()).as_deref(), Some("H"));
    }

    #[test]
    fn hetero_atom_names_resolve_two_letter_elements() {
        let content = "\
HETATM    1 CL1  LIG A   1       1.000   0.000   0.000  1.00  0.00
HETATM    2 CL2  LIG A   1      -1.000   0.000   0.000  1.00  0.00
HETATM    3 C3   LIG A   1       0.000   1.000   0.000  1.00  0.00
";
        let mut radii = library();
        radii.insert("CL", 1.75);
        let set = PdbFile::read_from(&mut Cursor::new(content), &radii).unwrap();
        assert_eq!(set.radii(), &[1.75, 1.75, 1.70]);
    }

    #[test]
    fn hetero_name_falls_back_to_one_letter_when_pair_is_unknown() {
        let line = "HETATM    1 CG1  LIG A   1       1.000   0.000   0.000  1.00  0.00";
        assert_eq!(element_symbol(line, true, &library()).as_deref(), Some("C"));
    }

    #[test]
    fn protein_alpha_carbon_ignores_calcium_entry() {
        let mut radii = library();
        radii.insert("CA", 2.31);
        let set = PdbFile::read_from(&mut Cursor::new(TWO_ATOMS), &radii).unwrap();
        assert_eq!(set.radii(), &[1.55, 1.70]);
    }

    #[test]
    fn unknown_element_is_reported_with_line() {
        let content =
            "ATOM      1  FE  HEM A   1       1.000   1.000   1.000  1.00  0.00          FE\n";
        let result = PdbFile::read_from(&mut Cursor::new(content), &library());
        assert!(matches!(
            result,
            Err(PdbError::UnknownElement { line: 1, ref element }) if element == "FE"
        ));
    }

    #[test]
    fn malformed_coordinate_is_reported() {
        let content =
            "ATOM      1  N   ALA A   1      1x.000  10.000  10.000  1.00  0.00           N\n";
        let result = PdbFile::read_from(&mut Cursor::new(content), &library());
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::InvalidFloat { .. }
            })
        ));
    }

    #[test]
    fn short_atom_line_is_rejected() {
        let result = PdbFile::read_from(&mut Cursor::new("ATOM      1  N\n"), &library());
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::LineTooShort,
                ..
            })
        ));
    }

    #[test]
    fn file_without_atoms_is_rejected() {
        let result = PdbFile::read_from(&mut Cursor::new("HEADER ONLY\nEND\n"), &library());
        assert!(matches!(result, Err(PdbError::MissingRecord(_))));
    }

    #[test]
    fn read_from_path_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = PdbFile::read_from_path(dir.path().join("missing.pdb"), &library());
        assert!(matches!(result, Err(PdbError::Io(_))));
    }

    #[test]
    fn read_from_path_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.pdb");
        fs::write(&path, TWO_ATOMS).unwrap();
        let set = PdbFile::read_from_path(&path, &library()).unwrap();
        assert_eq!(set.len(), 2);
    }
}
