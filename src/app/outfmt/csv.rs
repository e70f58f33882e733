use std::{fs::File, io, path::PathBuf};

use crate::{portfolio::render::RenderTable, util::os::mk_writable_dir};

use super::model::{Error, OutputType, ReportWriter};

/// Writes each table to its own file in out_dir.
pub struct CsvWriter {
    out_dir: PathBuf,
}

impl CsvWriter {
    pub fn new(out_dir: &str) -> Result<CsvWriter, io::Error> {
        let dir_path = PathBuf::from(out_dir);
        mk_writable_dir(&dir_path)?;
        Ok(CsvWriter { out_dir: dir_path })
    }

    pub fn file_path(&self, out_type: OutputType) -> PathBuf {
        self.out_dir.join(format!("{}.csv", out_type.slug()))
    }
}

impl ReportWriter for CsvWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        table_model: &RenderTable,
    ) -> Result<(), Error> {
        let file_path = self.file_path(out_type);
        let fp = File::create(&file_path)
            .map_err(|e| format!("Failed to create {}: {}", file_path.display(), e))?;

        // Notes and errors are single cells, so rows are not all the same
        // width.
        let mut csv_w = csv::WriterBuilder::new().flexible(true).from_writer(fp);
        let map_csv_err = |e: csv::Error| e.to_string();

        csv_w.write_record(&table_model.header).map_err(map_csv_err)?;
        for row in &table_model.rows {
            csv_w.write_record(row).map_err(map_csv_err)?;
        }
        if !table_model.footer.is_empty() {
            // Multi-line cells are fine in csv, but the year breakdown
            // reads better on one line.
            let footer: Vec<String> =
                table_model.footer.iter().map(|c| c.replace('\n', "; ")).collect();
            csv_w.write_record(&footer).map_err(map_csv_err)?;
        }
        for note in table_model.notes.iter().chain(&table_model.errors) {
            csv_w.write_record([note]).map_err(map_csv_err)?;
        }

        csv_w.flush().map_err(|e| e.to_string())?;
        tracing::debug!("CsvWriter: wrote {}", file_path.display());
        Ok(())
    }
}
