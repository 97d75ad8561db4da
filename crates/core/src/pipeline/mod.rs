//! Builds a [`MappingTable`] from the mapping sources and the program's class metadata.
//!
//! Stages and what they wait for:
//!
//! 1. intermediate parse, canonical method names, canonical field names (in parallel)
//! 2. constructor resolution, field merge, method merge (in parallel, each
//!    owning one attribute table produced by stage 1)
//! 3. record assembly, inheritance graph and propagation (single threaded)
//! 4. freezing into a `MappingTable`
//!
//! Any failure aborts the load after the running stage has drained.

pub mod join;

use crate::config::{LoaderConfig, TextSources};
use crate::error::{MappingError, Result};
use crate::hierarchy::{InheritanceGraph, PropagationStats, propagate};
use crate::merge::{MergedFields, MergedMethods, merge_fields, merge_methods};
use crate::metadata::ClassMetadataReader;
use crate::model::{MappingTable, NameRecord};
use crate::parser::{
    ClassNames, ConstructorTable, parse_canonical_names, parse_intermediate, resolve_constructors,
};
use crate::source::SourceSupplier;
use join::try_join3;
use std::time::Instant;

pub struct MappingLoader {
    config: LoaderConfig,
}

/// A finished table together with what propagation did to it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub table: MappingTable,
    pub propagation: PropagationStats,
}

impl MappingLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn load(
        &self,
        sources: &TextSources,
        reader: &dyn ClassMetadataReader,
    ) -> Result<MappingTable> {
        self.load_with_stats(sources, reader)
            .map(|outcome| outcome.table)
    }

    pub fn load_with_stats(
        &self,
        sources: &TextSources,
        reader: &dyn ClassMetadataReader,
    ) -> Result<LoadOutcome> {
        let started = Instant::now();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_count())
            .thread_name(|i| format!("namebridge-worker-{i}"))
            .build()
            .map_err(|e| MappingError::Io(std::io::Error::other(e)))?;

        let (classes, constructors, fields, methods) =
            pool.install(|| Self::parse_and_merge(sources, reader))?;

        let mut records = assemble(classes, constructors, fields, methods);

        let graph = InheritanceGraph::build(&records, reader)
            .map_err(|e| e.in_stage("inheritance graph"))?;
        let propagation = propagate(&mut records, &graph);
        drop(graph);

        let table = MappingTable::new(records).map_err(|e| e.in_stage("mapping table"))?;

        tracing::info!(
            "Built mappings for {} classes in {:?}",
            table.len(),
            started.elapsed()
        );
        Ok(LoadOutcome { table, propagation })
    }

    fn parse_and_merge(
        sources: &TextSources,
        reader: &dyn ClassMetadataReader,
    ) -> Result<(ClassNames, ConstructorTable, MergedFields, MergedMethods)> {
        let (parsed, method_names, field_names) = try_join3(
            ("intermediate mappings", || {
                parse_intermediate(open(&sources.intermediate)?, sources.intermediate.name())
            }),
            ("canonical method names", || {
                parse_canonical_names(
                    open(&sources.canonical_methods)?,
                    sources.canonical_methods.name(),
                )
            }),
            ("canonical field names", || {
                parse_canonical_names(
                    open(&sources.canonical_fields)?,
                    sources.canonical_fields.name(),
                )
            }),
        )?;

        let (classes, field_table, method_table) = parsed.into_parts();
        let (constructors, fields, methods) = try_join3(
            ("constructors", || {
                resolve_constructors(
                    open(&sources.constructors)?,
                    sources.constructors.name(),
                    &classes,
                )
            }),
            ("field merge", || merge_fields(field_table, &field_names, reader)),
            ("method merge", || Ok(merge_methods(method_table, &method_names))),
        )?;

        Ok((classes, constructors, fields, methods))
    }
}

impl Default for MappingLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

fn open(source: &SourceSupplier) -> Result<crate::source::SourceReader> {
    Ok(source.open()?)
}

/// Joins the independently produced attribute tables into records.
fn assemble(
    classes: ClassNames,
    mut constructors: ConstructorTable,
    mut fields: MergedFields,
    mut methods: MergedMethods,
) -> Vec<NameRecord> {
    classes
        .into_iter()
        .map(|(origin, canonical)| {
            let mut record = NameRecord::new(origin, canonical);
            record.constructors = constructors.remove(&record.origin_name).unwrap_or_default();
            record.fields = fields.remove(&record.origin_name).unwrap_or_default();
            record.methods = methods.remove(&record.origin_name).unwrap_or_default();
            record
        })
        .collect()
}
