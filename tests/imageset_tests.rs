use std::fs;
use std::path::Path;

use sheetscroll::Error;
use sheetscroll::imageset;
use tempfile::tempdir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"not a real image").unwrap();
}

fn names(set: &imageset::ImageSet) -> Vec<String> {
    set.paths()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn pages_sort_by_embedded_number() {
    let tmp = tempdir().unwrap();
    for name in ["page2.png", "page10.png", "page1.png", "cover.png"] {
        touch(tmp.path(), name);
    }

    let set = imageset::load(tmp.path()).unwrap();
    assert_eq!(
        names(&set),
        vec!["page1.png", "page2.png", "page10.png", "cover.png"]
    );
}

#[test]
fn unnumbered_ties_keep_name_order() {
    let tmp = tempdir().unwrap();
    for name in ["zebra.png", "alpha.png", "middle.png"] {
        touch(tmp.path(), name);
    }

    let set = imageset::load(tmp.path()).unwrap();
    // All keys are MAX; the stable sort keeps the name-sorted enumeration.
    assert_eq!(names(&set), vec!["alpha.png", "middle.png", "zebra.png"]);
}

#[test]
fn extension_match_is_case_insensitive() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "1.PNG");
    touch(tmp.path(), "2.JPeg");
    touch(tmp.path(), "3.JPG");
    touch(tmp.path(), "ignored.gif");
    touch(tmp.path(), "notes.txt");

    let set = imageset::load(tmp.path()).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(names(&set), vec!["1.PNG", "2.JPeg", "3.JPG"]);
}

#[test]
fn subdirectories_are_not_entered() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "1.png");
    let nested = tmp.path().join("nested");
    fs::create_dir(&nested).unwrap();
    touch(&nested, "2.png");

    let set = imageset::load(tmp.path()).unwrap();
    assert_eq!(set.len(), 1);
}

#[test]
fn missing_folder_is_not_found() {
    let err = imageset::load(Path::new("/no/such/dir")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn folder_without_supported_images_is_not_found() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "readme.md");
    touch(tmp.path(), "scan.tiff");

    let err = imageset::load(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
