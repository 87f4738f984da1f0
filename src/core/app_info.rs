/*
 * Static identity of the application: the name and version handed to the
 * native toolkit at startup, plus descriptive metadata used in logs. The same
 * name keys the per-user configuration directory.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppIdentity {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

pub const APP_IDENTITY: AppIdentity = AppIdentity {
    name: "CumulusAI",
    version: env!("CARGO_PKG_VERSION"),
    description: "Desktop Weather Station Application",
};

impl AppIdentity {
    // "CumulusAI 0.1.0", used in startup log lines.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
