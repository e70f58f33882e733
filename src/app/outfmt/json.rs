use std::{collections::BTreeMap, io::Write};

use crate::{portfolio::render::RenderTable, util::rw::WriteHandle};

use super::model::{Error, OutputType, ReportWriter};

/// Collects every table and writes them as one json object, keyed by
/// output type, when finished.
pub struct JsonWriter {
    w: WriteHandle,
    tables: BTreeMap<&'static str, RenderTable>,
}

impl JsonWriter {
    pub fn new(w: WriteHandle) -> JsonWriter {
        JsonWriter {
            w,
            tables: BTreeMap::new(),
        }
    }
}

impl ReportWriter for JsonWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        table_model: &RenderTable,
    ) -> Result<(), Error> {
        self.tables.insert(out_type.slug(), table_model.clone());
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(&self.tables)
            .map_err(|e| format!("Failed to serialize json: {e}"))?;
        writeln!(self.w, "{json}").map_err(|e| format!("{e}"))
    }
}
