//! Reads picked or dropped browser files into [`LocalFile`] values.

use drive_host::LocalFile;

/// Reads every file of `files` into memory, in list order.
///
/// # Errors
///
/// Returns an error when any file cannot be read.
pub async fn read_file_list(files: web_sys::FileList) -> Result<Vec<LocalFile>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        let mut local = Vec::with_capacity(files.length() as usize);
        for index in 0..files.length() {
            let Some(file) = files.get(index) else {
                continue;
            };
            local.push(read_file(&file).await?);
        }
        Ok(local)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = files;
        Err("file reading is only available in the browser".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_file(file: &web_sys::File) -> Result<LocalFile, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| format!("failed to read {}: {err:?}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(LocalFile::new(file.name(), file.type_(), bytes))
}
