use inquire::{Confirm, Text};

use crate::config::Config;

use super::ConfigureArgs;

pub fn configure(args: ConfigureArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.get_path {
        let _ = Config::file_path().inspect(|path| println!("{}", path));
        return Ok(());
    }

    let mut config = if args.update {
        Config::load()?
    } else {
        Config::default()
    };

    if config.default_server().is_none()
        || prompt_yes_no("Do you want to update the default tracking server?")?
    {
        config.default_server = Some(prompt_string(
            "Enter the tracking server URL (e.g., http://localhost:5000)",
            config.default_server(),
        )?);
    }

    save_configuration(config);

    Ok(())
}

fn prompt_yes_no(question: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let answer = Confirm::new(question).with_default(false).prompt()?;

    Ok(answer)
}

fn prompt_string(
    prompt: &str,
    default: Option<&String>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut text = Text::new(prompt);

    if let Some(default) = default {
        text = text.with_default(default);
    }

    Ok(text.prompt()?)
}

fn save_configuration(config: Config) {
    confy::store("mlmetrics", "config", config).expect("Failed to save configuration");

    match Config::file_path() {
        Ok(path) => println!("Saved config to {:?}", path),
        Err(_) => println!("Failed to save configuration"),
    }
}
