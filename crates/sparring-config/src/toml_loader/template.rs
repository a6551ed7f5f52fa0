//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Sparring configuration
# Only override what you want to change -- missing fields use defaults.

[model]
# name = "gemini-2.0-flash"
# max_tokens = 4096          # 1-65536
# temperature = 0.7          # 0.0-2.0
# request_timeout_secs = 0   # 0 = no timeout, max 3600
# stream = true

[credentials]
# Prefer the GOOGLE_API_KEY environment variable (or a .env file).
# api_key = ""

[persona]
# Leave unset to use the built-in Lehrplan 21 sparring partner.
# preamble = """..."""
# acknowledgment = "Verstanden. Ich bin bereit, als didaktischer Sparringspartner zu agieren."
# seed_template = "Erstelle einen Unterrichtsentwurf für {stage}, {class} im Fach {subject} zum Thema '{topic}'."

[context]
# stage = "Zyklus 1 (Kindergarten - 2. Klasse)"  # or "Zyklus 2 (3. - 6. Klasse)", "Zyklus 3 (Sekundarstufe I)"
# class = "1. Klasse"
# subject = "Mathematik"
# topic = "Addition im Zahlenraum 20"

[logging]
# level = "info"             # trace, debug, info, warn, error
"##
    .to_string()
}
