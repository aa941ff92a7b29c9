//! List supported actions

use crate::{cli::OutputFormat, error::CliResult, utils::ColoredOutput};
use serde_json::{json, Value as JsonValue};
use skyact_runtime::ActionKind;

pub struct ListCommand;

impl ListCommand {
    pub fn run(format: OutputFormat) -> CliResult<()> {
        match format {
            OutputFormat::Pretty => {
                for kind in ActionKind::ALL {
                    let descriptor = kind.descriptor();
                    let slots: Vec<_> = descriptor.slots.iter().map(|s| s.name).collect();
                    println!(
                        "{:<32} {:<7} {}",
                        ColoredOutput::highlight(descriptor.name),
                        ColoredOutput::info(descriptor.template.method.as_str()),
                        ColoredOutput::dim(&slots.join(", "))
                    );
                }
            }
            _ => println!("{}", format.render(&Self::actions_to_json())?),
        }
        Ok(())
    }

    fn actions_to_json() -> JsonValue {
        JsonValue::Array(
            ActionKind::ALL
                .iter()
                .map(|kind| {
                    let descriptor = kind.descriptor();
                    json!({
                        "name": descriptor.name,
                        "title": descriptor.title,
                        "method": descriptor.template.method,
                        "slots": descriptor
                            .slots
                            .iter()
                            .map(|s| json!({"name": s.name, "alternate": s.alternate}))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_json() {
        let actions = ListCommand::actions_to_json();
        assert_eq!(actions[0]["name"], "add-configuration-to-project");
        assert_eq!(actions[0]["method"], "POST");
        assert_eq!(actions[1]["slots"][0]["alternate"], "file");
    }
}
