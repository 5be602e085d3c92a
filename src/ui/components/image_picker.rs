// src/ui/components/image_picker.rs - File input that uploads to the image host

use dioxus::prelude::*;

use crate::api::{ImageFile, ImageUploader};
use crate::ui::state::{use_cancel_token, use_services};

/// Mime type guessed from the file extension
pub fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Picks one image, uploads it and reports the hosted URL.
///
/// `on_uploaded` receives `None` when reading or uploading failed; the
/// uploader has already logged why.
#[component]
pub fn ImagePicker(
    #[props(default = "".to_string())] id: String,
    #[props(default = "".to_string())] current_url: String,
    on_uploaded: EventHandler<Option<String>>,
    #[props(default = None)] on_clear: Option<EventHandler<()>>,
) -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let mut uploading = use_signal(|| false);

    let onchange = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        let uploader = services.uploader.clone();
        let token = token.clone();
        spawn(async move {
            uploading.set(true);
            let url = match engine.read_file(&name).await {
                Some(bytes) => {
                    let file = ImageFile::new(name.clone(), mime_for(&name), bytes);
                    uploader.upload(file, &token).await
                }
                None => {
                    tracing::warn!(file = %name, "could not read picked file");
                    None
                }
            };
            if !token.is_cancelled() {
                uploading.set(false);
                on_uploaded.call(url);
            }
        });
    };

    rsx! {
        div {
            class: "flex items-center space-x-3",
            if !current_url.is_empty() {
                img { class: "h-12 w-12 rounded object-cover border", src: "{current_url}", alt: "preview" }
                if let Some(clear) = on_clear {
                    button {
                        r#type: "button",
                        class: "text-xs text-red-600 hover:underline",
                        onclick: move |_| clear.call(()),
                        "Remove"
                    }
                }
            } else {
                input {
                    r#type: "file",
                    id: "{id}",
                    accept: "image/*",
                    class: "text-sm text-gray-600",
                    disabled: uploading(),
                    onchange: onchange,
                }
            }
            if uploading() {
                span { class: "text-xs text-gray-500", "Uploading..." }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("shirt.PNG"), "image/png");
        assert_eq!(mime_for("cover.jpeg"), "image/jpeg");
        assert_eq!(mime_for("notes.txt"), "application/octet-stream");
        assert_eq!(mime_for("no-extension"), "application/octet-stream");
    }
}
