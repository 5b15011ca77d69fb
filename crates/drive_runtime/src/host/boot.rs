use drive_host::{load_config_with, DriveConfig, DrivePath};
use leptos::{logging, spawn_local, Callable, Callback};

use crate::{host::DriveHostContext, reducer::DriveAction};

pub(super) fn install_boot(host: DriveHostContext, dispatch: Callback<DriveAction>) {
    dispatch.call(DriveAction::NavigateTo {
        path: DrivePath::root(),
    });

    spawn_local(async move {
        let config = match load_config_with(host.services().settings.as_ref()).await {
            Ok(config) => config,
            Err(err) => {
                logging::warn!("drive config load failed, using defaults: {err}");
                DriveConfig::default()
            }
        };
        logging::log!(
            "drive host `{}` ready ({:?} uploads)",
            host.host_name(),
            config.upload_backend
        );
        host.replace_config(config);
    });
}
