//! This is the module handling the `rates` sub-command.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use fcbox_engine::{message_rate, Session};

use crate::{resolve_dump, OpenOpts};

/// Message counts and rates for every configured type.
///
#[tracing::instrument(skip(session))]
pub fn show_rates(session: &mut Session, opts: &OpenOpts) -> Result<()> {
    trace!("enter");

    let dump = resolve_dump(session, &opts.dump)?;
    session.open(&dump)?;

    let types = session.config().open_file.message_types.clone();
    let log = session.log()?;

    let header = vec!["Type", "Messages", "Rate (Hz)", "Period (ms)"];
    let mut builder = Builder::default();
    builder.push_record(header);

    for name in &types {
        match log.stream(name) {
            Some(s) => {
                let r = message_rate(s);
                builder.push_record(vec![
                    r.name,
                    r.count.to_string(),
                    format!("{:.1}", r.freq_hz),
                    format!("{:.1}", r.period_ms),
                ]);
            }
            None => {
                builder.push_record(vec![name.as_str(), "not found", "", ""]);
            }
        }
    }
    let table = builder.build().with(Style::modern()).to_string();
    println!("{}", table);

    Ok(())
}
