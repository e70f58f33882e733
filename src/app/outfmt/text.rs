use std::io::Write;

use tabled::settings::{
    object::{Cell, Columns, Rows},
    style::On,
    Alignment, Border,
};

use crate::{portfolio::render::RenderTable, util::rw::WriteHandle};

use super::model::{Error, OutputType, ReportWriter};

pub struct TextWriter {
    w: WriteHandle,
}

impl TextWriter {
    pub fn new(w: WriteHandle) -> TextWriter {
        TextWriter { w }
    }
}

// Border chars for one cell. Spaces hide that part of the border.
struct CellBorder {
    top: char,
    bottom: char,
    left: char,
    right: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
}

impl CellBorder {
    fn to_border(&self) -> Border<On, On, On, On> {
        Border::full(
            self.top,
            self.bottom,
            self.left,
            self.right,
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        )
    }

    fn hidden() -> CellBorder {
        Self {
            top: ' ',
            bottom: ' ',
            left: ' ',
            right: ' ',
            top_left: ' ',
            top_right: ' ',
            bottom_left: ' ',
            bottom_right: ' ',
        }
    }
}

impl Default for CellBorder {
    fn default() -> Self {
        Self {
            top: '-',
            bottom: '-',
            left: '|',
            right: '|',
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
        }
    }
}

// Open outer edges, so the table reads more like a report than a grid.
fn open_outer_edges(table: &mut tabled::Table, n_cols: usize) {
    table.modify(
        Rows::first(),
        CellBorder { top: ' ', top_left: ' ', top_right: ' ', ..Default::default() }
            .to_border(),
    );
    table.modify(
        Columns::first(),
        CellBorder { left: ' ', top_left: '-', bottom_left: '-', ..Default::default() }
            .to_border(),
    );
    table.modify(
        Columns::last(),
        CellBorder { right: ' ', top_right: '-', bottom_right: '-', ..Default::default() }
            .to_border(),
    );
    table.modify(
        Cell::new(0, 0),
        CellBorder {
            left: ' ',
            top: ' ',
            top_left: ' ',
            top_right: ' ',
            bottom_left: '-',
            ..Default::default()
        }
        .to_border(),
    );
    table.modify(
        Cell::new(0, n_cols - 1),
        CellBorder {
            right: ' ',
            top: ' ',
            top_left: ' ',
            top_right: ' ',
            bottom_right: '-',
            ..Default::default()
        }
        .to_border(),
    );
}

// The footer sits under the main table, after one blank row. Only its
// non-empty cells get borders.
fn style_footer(table: &mut tabled::Table, footer: &[String], sep_row: usize) {
    let footer_row = sep_row + 1;
    table.modify(Rows::single(sep_row), Border::new().set_left(' ').set_right(' '));
    table.modify(Rows::single(footer_row), CellBorder::hidden().to_border());

    for (col, footer_cell) in footer.iter().enumerate() {
        if !footer_cell.is_empty() {
            table.modify(Cell::new(sep_row, col), CellBorder::default().to_border());
            table.modify(Cell::new(footer_row, col), CellBorder::default().to_border());
        }
    }
}

pub fn render_table_to_string(table_model: &RenderTable) -> String {
    let n_cols = table_model.header.len();
    if n_cols == 0 {
        return String::new();
    }

    let mut table_bldr = tabled::builder::Builder::default();
    table_bldr.push_record(table_model.header.iter().map(|h| h.to_uppercase()));
    for row in &table_model.rows {
        table_bldr.push_record(row.clone());
    }

    let has_footer = !table_model.footer.is_empty();
    if has_footer {
        table_bldr.push_record(vec![String::new(); n_cols]);
        table_bldr.push_record(table_model.footer.clone());
    }

    let mut table = table_bldr.build();
    table.with(tabled::settings::Style::ascii());
    table.modify(Rows::first(), Alignment::center());
    open_outer_edges(&mut table, n_cols);

    if has_footer {
        style_footer(&mut table, &table_model.footer, 1 + table_model.rows.len());
    }

    table.to_string()
}

impl ReportWriter for TextWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        table_model: &RenderTable,
    ) -> Result<(), Error> {
        let map_write_err = |e| format!("{e}");

        for err in &table_model.errors {
            writeln!(self.w, "[!] {}", err).map_err(map_write_err)?;
        }

        writeln!(self.w, "{}", out_type.title()).map_err(map_write_err)?;
        writeln!(self.w, "{}", render_table_to_string(table_model))
            .map_err(map_write_err)?;

        for note in &table_model.notes {
            writeln!(self.w, "{note}").map_err(map_write_err)?;
        }

        writeln!(self.w, "").map_err(map_write_err)?;
        Ok(())
    }
}
