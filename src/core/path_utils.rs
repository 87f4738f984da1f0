// Locating the per-user directory where CumulusAI looks for its settings and log.
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/*
 * The local (non-roaming) config directory for `app_name`:
 * `%LOCALAPPDATA%\<app_name>\config` on Windows, `~/.config/<app_name>` on
 * Linux. Only resolves the path; nothing is created. `None` when the host has
 * no home directory.
 */
pub fn app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    ProjectDirs::from("", "", app_name).map(|dirs| dirs.config_local_dir().to_path_buf())
}

/*
 * Like `app_config_local_dir`, but creates the directory on demand. Used only
 * for output the user has opted into. `None` when the directory cannot be
 * determined or created.
 */
pub fn get_base_app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    let config_dir = app_config_local_dir(app_name)?;
    match fs::create_dir_all(&config_dir) {
        Ok(()) => {
            log::trace!("PathUtils: Config directory for '{app_name}' is {config_dir:?}.");
            Some(config_dir)
        }
        Err(e) => {
            log::error!("PathUtils: Cannot create config directory {config_dir:?}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_local_dir_does_not_create_anything() {
        let app_name = format!("TestApp_PathUtils_Lookup_{}", rand::random::<u128>());

        let Some(path) = app_config_local_dir(&app_name) else {
            // Hosts without a home directory have no config location at all.
            return;
        };

        assert!(!path.exists(), "Lookup must not create {path:?}");
        assert!(
            path.to_string_lossy()
                .to_lowercase()
                .contains(&app_name.to_lowercase()),
            "Path should contain the app name. Path: {path:?}"
        );
    }

    #[test]
    fn test_get_base_app_config_local_dir_creates_and_reuses_directory() {
        let app_name = format!("TestApp_PathUtils_Create_{}", rand::random::<u128>());

        if app_config_local_dir(&app_name).is_none() {
            assert!(get_base_app_config_local_dir(&app_name).is_none());
            return;
        }

        let first = get_base_app_config_local_dir(&app_name)
            .expect("Config dir should be resolvable when ProjectDirs is");
        assert!(first.is_dir(), "Directory should have been created at {first:?}");
        assert_eq!(app_config_local_dir(&app_name).as_ref(), Some(&first));

        let second = get_base_app_config_local_dir(&app_name);
        assert_eq!(second.as_ref(), Some(&first));

        if let Err(e) = fs::remove_dir_all(&first) {
            eprintln!("Test cleanup error for {}: {e}", first.display());
        }
    }
}
