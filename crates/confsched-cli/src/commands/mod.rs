//! Subcommand implementations.

pub mod config;
pub mod dump;
pub mod summary;
pub mod tables;

use std::path::Path;

use confsched_core::{Schedule, ScheduleFilter};
use confsched_source::{FileSource, PageSource, load_schedule};

use crate::cli::ScheduleCommand;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use tables::Destination;

/// Runs a schedule command against a loaded schedule.
pub fn run(
    command: ScheduleCommand,
    schedule: &Schedule,
    config: &ClientConfig,
) -> ClientResult<()> {
    match command {
        ScheduleCommand::Summary { json } => summary::run(schedule, json),
        ScheduleCommand::Events { filter, output } => {
            let dest = Destination::resolve(&output, &config.export);
            tables::events(schedule, &filter.to_filter(), &dest)
        }
        ScheduleCommand::Presenters { companies, output } => {
            let dest = Destination::resolve(&output, &config.export);
            let filter = ScheduleFilter::new().with_companies(companies);
            tables::presenters(schedule, &filter, &dest)
        }
        ScheduleCommand::Companies { companies, output } => {
            let dest = Destination::resolve(&output, &config.export);
            let filter = ScheduleFilter::new().with_companies(companies);
            tables::companies(schedule, &filter, &dest)
        }
        ScheduleCommand::Dump {
            output,
            adjust_width,
        } => dump::run(
            schedule,
            &output,
            adjust_width || config.export.adjust_column_width,
        ),
    }
}

/// Loads the schedule from `--input` when given, otherwise from the network.
pub async fn load(
    input: Option<&Path>,
    url: Option<&str>,
    config: &ClientConfig,
) -> ClientResult<Schedule> {
    let source_config = config
        .source
        .to_source_config(url)
        .map_err(ClientError::Config)?;
    let event_base_url = source_config.event_base_url.to_string();
    let source = page_source(input, source_config)?;
    Ok(load_schedule(source.as_ref(), &event_base_url).await?)
}

fn page_source(
    input: Option<&Path>,
    source_config: confsched_source::SourceConfig,
) -> ClientResult<Box<dyn PageSource>> {
    if let Some(path) = input {
        return Ok(Box::new(FileSource::new(path)));
    }

    #[cfg(feature = "fetch")]
    {
        Ok(Box::new(confsched_source::HttpSource::new(source_config)?))
    }

    #[cfg(not(feature = "fetch"))]
    {
        let _ = source_config;
        Err(ClientError::Config(
            "built without network support; pass --input <file>".to_string(),
        ))
    }
}
