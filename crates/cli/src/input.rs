use anyhow::{bail, Context, Result};
use geoprofile::column::{Column, ColumnRecord, SoilCatalog};
use geoprofile::geom2::Polyline;
use std::fs;
use std::path::Path;

/// Read a JSON array of column records and validate every entry.
///
/// Fails on the first invalid record, naming its position and name.
pub fn read_columns(path: &Path, catalog: &impl SoilCatalog) -> Result<Vec<Column>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<ColumnRecord> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing column records from {}", path.display()))?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| {
            let label = rec.name.clone().unwrap_or_else(|| "<unnamed>".into());
            rec.into_column(catalog)
                .with_context(|| format!("column #{i} ({label}) is invalid"))
        })
        .collect()
}

/// Parse `"x,y;x,y;..."` into a path.
pub fn parse_path(text: &str) -> Result<Polyline> {
    let mut coords = Vec::new();
    for (i, pair) in text.split(';').map(str::trim).enumerate() {
        if pair.is_empty() {
            continue;
        }
        let Some((x, y)) = pair.split_once(',') else {
            bail!("path vertex #{i} `{pair}` is not of the form x,y");
        };
        let x: f64 = x.trim().parse().with_context(|| format!("path vertex #{i}: bad x"))?;
        let y: f64 = y.trim().parse().with_context(|| format!("path vertex #{i}: bad y"))?;
        coords.push((x, y));
    }
    Ok(Polyline::from_coords(&coords)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoprofile::column::Nen8990;
    use tempfile::tempdir;

    #[test]
    fn parse_path_accepts_whitespace_and_trailing_separator() {
        let p = parse_path(" 0,0 ; 10, 0;10,-5;").unwrap();
        assert_eq!(p.vertices().len(), 3);
        assert_eq!(p.last().y, -5.0);
    }

    #[test]
    fn parse_path_rejects_malformed_input() {
        assert!(parse_path("0,0").is_err());
        assert!(parse_path("0;1,1").is_err());
        assert!(parse_path("a,0;1,1").is_err());
    }

    #[test]
    fn read_columns_reports_the_bad_record() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.json");
        fs::write(
            &good,
            r#"[{"name": "B1", "x": 0, "y": 0,
                 "classify": {"depth": [0], "thickness": [1], "geotechnicalSoilName": ["zand"]}}]"#,
        )
        .unwrap();
        let cols = read_columns(&good, &Nen8990).unwrap();
        assert_eq!(cols[0].name(), "B1");

        let bad = dir.path().join("bad.json");
        fs::write(
            &bad,
            r#"[{"name": "B2", "x": 0, "y": 0,
                 "classify": {"depth": [0], "thickness": [1], "geotechnicalSoilName": ["lava"]}}]"#,
        )
        .unwrap();
        let err = read_columns(&bad, &Nen8990).unwrap_err();
        assert!(format!("{err:#}").contains("column #0 (B2)"));
    }
}
