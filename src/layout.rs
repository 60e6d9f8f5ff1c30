//! Layout partitioner: place attributes on a grid of rows and columns.
//!
//! Attributes fill row 1 left to right, then row 2, and so on. The last row
//! may be short; it is neither padded nor re-balanced, and its cells keep the
//! same width as every other cell.

use crate::markup::Attrs;
use crate::spec::{CloneConfig, GridConfig, RenderSettings, column_width};

use indexmap::IndexMap;

/// One attribute placed on the grid.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'s> {
    pub name: &'s str,
    pub settings: &'s RenderSettings,
    /// Position in the attribute map, counted from 0. Independent of row/column.
    pub index: usize,
    pub row: usize,
    pub column: usize,
    /// Grid units, `GRID_WIDTH / columns` rounded down.
    pub width: usize,
}

pub type Row<'s> = Vec<Cell<'s>>;

/// Split `attributes` into rows of `columns` cells.
///
/// With `columns <= 1` every attribute lands in a single row. No attributes
/// means no rows.
pub fn partition(attributes: &IndexMap<String, RenderSettings>, columns: usize) -> Vec<Row<'_>> {
    let per_row = if columns <= 1 {
        attributes.len().max(1)
    } else {
        columns
    };
    let width = column_width(columns);

    let cells: Vec<Cell<'_>> = attributes
        .iter()
        .enumerate()
        .map(|(index, (name, settings))| Cell {
            name,
            settings,
            index,
            row: index / per_row,
            column: index % per_row,
            width,
        })
        .collect();

    let rows: Vec<Row<'_>> = cells.chunks(per_row).map(<[Cell<'_>]>::to_vec).collect();
    log::debug!(
        "partitioned {} attributes into {} row(s) of up to {} cell(s), width {}",
        attributes.len(),
        rows.len(),
        per_row,
        width
    );
    rows
}

/// Row container attributes: the configured row options plus `row` and the
/// clone row marker.
pub fn row_options(grid: &GridConfig, clone: &CloneConfig) -> Attrs {
    grid.row_options
        .clone()
        .with_class("row")
        .with_class(&clone.row_name)
}

/// Column container attributes for `cell`.
///
/// The attribute's own column options are laid over the fieldset defaults, then
/// the `col-<size>-<width>` class is added.
pub fn column_options(grid: &GridConfig, cell: &Cell<'_>) -> Attrs {
    let options = match &cell.settings.column_options {
        Some(own) => grid.column_options.merged(own),
        None => grid.column_options.clone(),
    };
    options.with_class(&format!("col-{}-{}", grid.column_size.as_str(), cell.width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ColumnSize;
    use pretty_assertions::assert_eq;

    fn attributes(n: usize) -> IndexMap<String, RenderSettings> {
        (0..n)
            .map(|i| (format!("attr{}", i), RenderSettings::text()))
            .collect()
    }

    #[test]
    fn rows_cover_every_attribute_in_order() {
        for n in 0..=13 {
            let attrs = attributes(n);
            for c in 2..=7 {
                let rows = partition(&attrs, c);
                assert_eq!(rows.len(), n.div_ceil(c), "n={} c={}", n, c);
                assert!(rows.iter().all(|r| !r.is_empty() && r.len() <= c));

                let flat: Vec<&str> = rows.iter().flatten().map(|cell| cell.name).collect();
                let expected: Vec<&str> = attrs.keys().map(String::as_str).collect();
                assert_eq!(flat, expected);

                let indexes: Vec<usize> = rows.iter().flatten().map(|cell| cell.index).collect();
                assert_eq!(indexes, (0..n).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn short_last_row_keeps_full_width() {
        let attrs = attributes(5);
        let rows = partition(&attrs, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].len(), 2);
        assert!(rows.iter().flatten().all(|cell| cell.width == 4));
        assert_eq!((rows[1][1].row, rows[1][1].column, rows[1][1].index), (1, 1, 4));
    }

    #[test]
    fn single_column_is_one_row() {
        let attrs = attributes(4);
        let rows = partition(&attrs, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0][3].index, 3);
        assert!(partition(&attributes(0), 1).is_empty());
    }

    #[test]
    fn column_options_merge_attribute_over_defaults() {
        let grid = GridConfig::new(2)
            .with_column_size(ColumnSize::Medium)
            .with_column_options(Attrs::new().with("class", "cell").with("data-x", "1"));
        let mut attrs = attributes(1);
        attrs.insert(
            "special".to_string(),
            RenderSettings::text().with_column_options(Attrs::new().with("class", "special")),
        );
        let rows = partition(&attrs, 2);

        let plain = column_options(&grid, &rows[0][0]);
        assert_eq!(plain.get("class"), Some("cell col-md-6"));

        let special = column_options(&grid, &rows[0][1]);
        assert_eq!(special.get("class"), Some("special col-md-6"));
        assert_eq!(special.get("data-x"), Some("1"));
        assert_eq!(grid.column_options.get("class"), Some("cell"));
    }

    #[test]
    fn row_options_carry_row_marker() {
        let grid = GridConfig::new(2).with_row_options(Attrs::new().with("class", "tight"));
        let clone = CloneConfig {
            row_name: "contact-row".to_string(),
            ..CloneConfig::default()
        };
        assert_eq!(
            row_options(&grid, &clone).get("class"),
            Some("tight row contact-row")
        );
        assert_eq!(
            row_options(&GridConfig::new(2), &CloneConfig::default()).get("class"),
            Some("row")
        );
    }
}
