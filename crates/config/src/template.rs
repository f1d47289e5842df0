//! Default configuration template with all options documented.

/// The documented default config written by `formrelay config init`.
#[must_use]
pub fn default_config_template() -> &'static str {
    r##"# formrelay configuration
# =======================
# Changes require a restart to take effect.
#
# Environment variable substitution is supported: ${ENV_VAR} or
# ${ENV_VAR:-fallback}. DISCORD_TOKEN, FORM_URL and CHANNEL_ID also override
# the matching values below when set.

# ══════════════════════════════════════════════════════════════════════════════
# DISCORD
# ══════════════════════════════════════════════════════════════════════════════

[discord]
token = "${DISCORD_TOKEN:-}"            # Keep the token out of this file
# channel_id = "123456789012345678"     # Initial channel to monitor (!setchannel overrides)
command_prefix = "!"                    # !setchannel, !channel, !help
user_allowlist = []                     # Who may submit (IDs/names, * wildcards); empty = everyone
admin_allowlist = []                    # Extra admins besides the ADMINISTRATOR permission

# ══════════════════════════════════════════════════════════════════════════════
# FORM
# ══════════════════════════════════════════════════════════════════════════════

[form]
url = "${FORM_URL:-}"                   # e.g. https://docs.google.com/forms/d/e/<id>/formResponse

[form.fields]                           # Form-field identifier for each message field
reason = "entry.987654321"
amount = "entry.876543210"
deadline = "entry.765432109"
note = "entry.654321098"

# ══════════════════════════════════════════════════════════════════════════════
# STORAGE
# ══════════════════════════════════════════════════════════════════════════════

[storage]
# channel_file = "/var/lib/formrelay/channel.json"   # Default: <data dir>/channel.json
"##
}
