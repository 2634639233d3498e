use onboard_config::Config;
use onboard_core::util::truncate_chars;

/// Strategy for displaying configuration information.
///
/// This strategy outputs the effective configuration:
/// - Config file location
/// - Reply mode and sampling defaults
/// - Remote provider endpoint and whether the API key is set (masked)
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let path = Config::default_path()?;
        let config = Config::load_from(&path)?;

        println!("=== LegacyOnboard Configuration ===\n");

        println!("Config File:");
        if path.exists() {
            println!("  {}", path.display());
        } else {
            println!("  {} (not found, using defaults)", path.display());
        }
        println!();

        let defaults = &config.agents.defaults;
        println!("Agent Defaults:");
        println!("  Mode: {}", defaults.mode);
        println!("  Model: {}", defaults.model);
        println!("  Max Tokens: {}", defaults.max_tokens);
        println!("  Temperature: {}", defaults.temperature);
        if let Some(ref prompt) = defaults.system_prompt {
            println!("  System Prompt: {}", truncate(prompt, 60));
        }
        println!();

        let provider = &config.providers.openai;
        println!("Remote Provider:");
        println!("  Base URL: {}", provider.base_url);
        println!(
            "  API Key ({}): {}",
            provider.api_key_env,
            provider
                .api_key()
                .map_or_else(|| "(not set)".to_string(), |key| mask_key(&key))
        );
        println!();

        println!("Display:");
        println!("  Preview Chars: {}", config.display.preview_chars);

        Ok(())
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", truncate_chars(s, max_len.saturating_sub(3)))
    }
}
