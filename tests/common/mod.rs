#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A directory listing page the way Apache and nginx render them.
pub fn listing_page(title: &str, names: &[&str]) -> String {
    let rows: String = names
        .iter()
        .map(|name| format!("<a href=\"{name}\">{name}</a>          17-Mar-2025 10:25    -\n"))
        .collect();
    format!(
        "<html><head><title>Index of {title}</title></head><body>\n\
         <h1>Index of {title}</h1><hr><pre><a href=\"../\">../</a>\n{rows}</pre><hr></body></html>\n"
    )
}

pub fn write_catalog(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("distros.yaml");
    fs::write(&path, yaml).expect("Failed to write catalog");
    path
}

pub fn write_products_xml(dir: &Path, files: &[(&str, &str, &str, &str)]) -> PathBuf {
    let records: String = files
        .iter()
        .map(|(file_name, language, edition, architecture)| {
            format!(
                "<File><FileName>{file_name}</FileName><LanguageCode>{language}</LanguageCode>\
                 <Language>English (United States)</Language><Edition>{edition}</Edition>\
                 <Architecture>{architecture}</Architecture><Size>3500000000</Size>\
                 <Sha1>DA39A3EE5E6B4B0D3255BFEF95601890AFD80709</Sha1>\
                 <FilePath>http://dl.delivery.mp.microsoft.com/filestreamingservice/files/{file_name}</FilePath>\
                 </File>\n"
            )
        })
        .collect();
    let path = dir.join("products.xml");
    fs::write(
        &path,
        format!("<MCT><Catalogs><Catalog><PublishedMedia><Files>\n{records}</Files></PublishedMedia></Catalog></Catalogs></MCT>\n"),
    )
    .expect("Failed to write products.xml");
    path
}
