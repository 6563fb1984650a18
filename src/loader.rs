/// Fetches the bundled blurb files for a folder

use futures::future::join_all;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::blurb_data::{BlurbSet, Category, Folder};
use crate::error::LoadError;

/// Blurb files are served from the extension root
pub const BLURB_BASE_PATH: &str = "/blurbs";

pub fn file_path(folder: Folder, file: &str) -> String {
    format!("{}/{}/{}.json", BLURB_BASE_PATH, folder.name(), file)
}

/// Load every file of `folder`. Files that fail are logged and left out.
/// The set is only built once all files have settled.
pub async fn load_folder(folder: Folder) -> BlurbSet {
    let requests = folder.files().iter().map(|file| async move {
        let path = file_path(folder, file);
        let result = match fetch_text(&path).await {
            Ok(body) => parse_file(&path, file, &body),
            Err(e) => Err(e),
        };
        (*file, result)
    });

    let results = join_all(requests).await;
    assemble(folder, results)
}

/// Keep the files that loaded, in folder order
pub fn assemble(folder: Folder, results: Vec<(&str, Result<Category, LoadError>)>) -> BlurbSet {
    let categories = results
        .into_iter()
        .filter_map(|(file, result)| match result {
            Ok(category) => Some(category),
            Err(e) => {
                log::error!("Error loading {}: {}", file, e);
                None
            }
        })
        .collect::<Vec<_>>();

    log::info!(
        "Loaded {} of {} blurb files from {}",
        categories.len(),
        folder.files().len(),
        folder.name()
    );
    BlurbSet::new(folder, categories)
}

pub fn parse_file(path: &str, file: &str, body: &str) -> Result<Category, LoadError> {
    Category::from_json(file, body).map_err(|source| LoadError::Parse {
        path: path.to_string(),
        source,
    })
}

async fn fetch_text(path: &str) -> Result<String, LoadError> {
    let fetch_err = |reason: String| LoadError::Fetch {
        path: path.to_string(),
        reason,
    };

    let window = web_sys::window().ok_or_else(|| fetch_err("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| fetch_err(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| fetch_err(format!("unexpected response {:?}", e)))?;

    if !response.ok() {
        return Err(LoadError::Status {
            path: path.to_string(),
            status: response.status(),
        });
    }

    let text = response.text().map_err(|e| fetch_err(format!("{:?}", e)))?;
    JsFuture::from(text)
        .await
        .map_err(|e| fetch_err(format!("{:?}", e)))?
        .as_string()
        .ok_or_else(|| fetch_err("response body is not text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JEWELLERY_DR: &str = include_str!("../static/blurbs/DRBlurbs/JewelleryDR.json");
    const TOYS_DR: &str = include_str!("../static/blurbs/DRBlurbs/ToysDR.json");

    fn loaded(folder: Folder, file: &'static str, body: &str) -> (&'static str, Result<Category, LoadError>) {
        (file, parse_file(&file_path(folder, file), file, body))
    }

    #[test]
    fn test_file_path() {
        assert_eq!(
            file_path(Folder::SaBlurbs, "NTJewellerySA"),
            "/blurbs/SABlurbs/NTJewellerySA.json"
        );
    }

    #[test]
    fn test_assemble_all_files() {
        let set = assemble(
            Folder::DrBlurbs,
            vec![
                loaded(Folder::DrBlurbs, "JewelleryDR", JEWELLERY_DR),
                loaded(Folder::DrBlurbs, "ToysDR", TOYS_DR),
            ],
        );

        let mut names: Vec<&str> = set.category_names().collect();
        names.sort();
        assert_eq!(names, vec!["JewelleryDR", "ToysDR"]);
        assert_eq!(set.folder, Some(Folder::DrBlurbs));
    }

    #[test]
    fn test_assemble_skips_failed_fetch() {
        let set = assemble(
            Folder::DrBlurbs,
            vec![
                loaded(Folder::DrBlurbs, "JewelleryDR", JEWELLERY_DR),
                (
                    "ToysDR",
                    Err(LoadError::Status {
                        path: file_path(Folder::DrBlurbs, "ToysDR"),
                        status: 404,
                    }),
                ),
            ],
        );

        assert_eq!(set.category_names().collect::<Vec<_>>(), vec!["JewelleryDR"]);
        assert!(set.category("ToysDR").is_none());
    }

    #[test]
    fn test_assemble_skips_invalid_json() {
        let set = assemble(
            Folder::DrBlurbs,
            vec![
                loaded(Folder::DrBlurbs, "JewelleryDR", "{ not json"),
                loaded(Folder::DrBlurbs, "ToysDR", TOYS_DR),
            ],
        );

        assert_eq!(set.category_names().collect::<Vec<_>>(), vec!["ToysDR"]);
    }

    #[test]
    fn test_assemble_nothing_loaded_is_empty_not_error() {
        let set = assemble(
            Folder::SaBlurbs,
            vec![(
                "ToysSA",
                Err(LoadError::Fetch {
                    path: file_path(Folder::SaBlurbs, "ToysSA"),
                    reason: "offline".to_string(),
                }),
            )],
        );

        assert!(set.is_empty());
        assert_eq!(set.folder, Some(Folder::SaBlurbs));
    }

    #[test]
    fn test_parse_error_names_path() {
        let err = parse_file("/blurbs/DRBlurbs/ToysDR.json", "ToysDR", "[]").unwrap_err();
        assert!(err.to_string().starts_with("/blurbs/DRBlurbs/ToysDR.json is not a valid blurb file"));
    }

    #[test]
    fn test_bundled_files_exist_for_every_folder() {
        let bundled = [
            ("DRBlurbs", "JewelleryDR", JEWELLERY_DR),
            ("DRBlurbs", "ToysDR", TOYS_DR),
            ("SABlurbs", "JewellerySA", include_str!("../static/blurbs/SABlurbs/JewellerySA.json")),
            ("SABlurbs", "NTJewellerySA", include_str!("../static/blurbs/SABlurbs/NTJewellerySA.json")),
            ("SABlurbs", "ToysSA", include_str!("../static/blurbs/SABlurbs/ToysSA.json")),
        ];

        for folder in Folder::ALL {
            for file in folder.files() {
                let (_, _, body) = bundled
                    .iter()
                    .find(|(f, name, _)| *f == folder.name() && name == file)
                    .unwrap_or_else(|| panic!("{}/{} is not bundled", folder.name(), file));
                assert!(parse_file(&file_path(folder, file), file, body).is_ok());
            }
        }
    }
}
