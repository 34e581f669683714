mod common;

use common::{listing_page, write_catalog, write_products_xml};
use iso_list::catalog::Catalog;
use iso_list::http::HttpFetcher;
use iso_list::indicator::SilentProgress;
use iso_list::models::{HashType, RecordSource};
use iso_list::output::{to_json_string, write_results};
use iso_list::resolve::Resolver;
use iso_list::vendor::ProductsXmlCatalog;
use mockito::{Mock, Server, ServerGuard};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const NETINST_SHA256: &str = "0b6a2b9f8f3d2c1e4a5b6c7d8e9f00112233445566778899aabbccddeeff0011";
const ARCH_SHA256: &str = "3d2c1e4a5b6c7d8e9f00112233445566778899aabbccddeeff00110b6a2b9f8f";

fn fetcher() -> HttpFetcher {
    HttpFetcher::new("iso-list-tests", Duration::from_secs(5), 0)
}

/// A mirror with a versioned Debian tree and a flat Arch directory. The mocks
/// stay registered while the returned handles are alive.
fn mirror() -> (ServerGuard, Vec<Mock>) {
    let mut server = Server::new();
    let mut mocks = Vec::new();

    mocks.push(
        server
            .mock("GET", "/debian-cd/")
            .with_body(listing_page(
                "/debian-cd/",
                &["12.9.0/", "12.10.0/", "12.10.0-live/", "current/", "project/"],
            ))
            .create(),
    );
    mocks.push(
        server
            .mock("GET", "/debian-cd/12.10.0/")
            .with_body(listing_page("/debian-cd/12.10.0/", &["amd64/", "arm64/"]))
            .create(),
    );
    mocks.push(
        server
            .mock("GET", "/debian-cd/12.10.0/amd64/")
            .with_body(listing_page(
                "/debian-cd/12.10.0/amd64/",
                &["iso-cd/", "iso-dvd/"],
            ))
            .create(),
    );
    mocks.push(
        server
            .mock("GET", "/debian-cd/12.10.0/amd64/iso-cd/")
            .with_body(listing_page(
                "/debian-cd/12.10.0/amd64/iso-cd/",
                &[
                    "SHA256SUMS",
                    "SHA512SUMS",
                    "debian-12.10.0-amd64-netinst.iso",
                    "debian-12.10.0-amd64-DVD-1.iso",
                ],
            ))
            .create(),
    );
    mocks.push(
        server
            .mock("GET", "/debian-cd/12.10.0/amd64/iso-cd/SHA256SUMS")
            .with_body(format!(
                "{}  debian-12.10.0-amd64-DVD-1.iso\n{NETINST_SHA256}  debian-12.10.0-amd64-netinst.iso\n",
                "f".repeat(64)
            ))
            .create(),
    );
    mocks.push(
        server
            .mock("HEAD", "/debian-cd/12.10.0/amd64/iso-cd/debian-12.10.0-amd64-netinst.iso")
            .with_body("x".repeat(4096))
            .create(),
    );

    mocks.push(
        server
            .mock("GET", "/archlinux/iso/")
            .with_body(listing_page(
                "/archlinux/iso/",
                &["2025.01.01/", "2025.02.01/", "2025.03.01/", "latest/"],
            ))
            .create(),
    );
    mocks.push(
        server
            .mock("GET", "/archlinux/iso/2025.03.01/")
            .with_body(listing_page(
                "/archlinux/iso/2025.03.01/",
                &[
                    "archlinux-2025.03.01-x86_64.iso",
                    "archlinux-2025.03.01-x86_64.iso.sig",
                    "b2sums.txt",
                    "sha256sums.txt",
                ],
            ))
            .create(),
    );
    mocks.push(
        server
            .mock("GET", "/archlinux/iso/2025.03.01/sha256sums.txt")
            .with_body(format!(
                "{ARCH_SHA256}  archlinux-2025.03.01-x86_64.iso\n{}  archlinux-bootstrap-x86_64.tar.zst\n",
                "e".repeat(64)
            ))
            .create(),
    );
    mocks.push(
        server
            .mock("HEAD", "/archlinux/iso/2025.03.01/archlinux-2025.03.01-x86_64.iso")
            .with_status(405)
            .create(),
    );

    (server, mocks)
}

fn catalog_yaml(base: &str) -> String {
    format!(
        r#"
distributions:
  - Name: Debian
    URL: {base}/debian-cd/
    VersionMatch: "."
    PathNavigation: [amd64, iso-cd]
    Extension: "debian-*-amd64-netinst.iso"
    HashMatch: SHA256SUMS
  - Name: Arch Linux
    URL: {base}/archlinux/iso
    Extension: "archlinux-*-x86_64.iso"
    HashMatch: "sha256sums*"
  - Name: Vanished
    URL: {base}/vanished/
    Extension: "*.iso"
  - Name: Tails
    DIRECT: https://download.tails.net/tails/stable/tails-amd64-6.12/tails-amd64-6.12.img
    SHA256: {NETINST_SHA256}
    Version: "6.12"
  - Name: Windows 11
    WindowsMode: enabled
    Edition: Professional
    Language: en-us
    Architecture: x64
  - Name: No Strategy
"#
    )
}

#[test]
fn test_resolve_full_catalog() {
    let (server, _mocks) = mirror();
    let temp_dir = TempDir::new().unwrap();
    let products = write_products_xml(
        temp_dir.path(),
        &[(
            "26100.1742.240906-0331.ge_release_svc_refresh_CLIENTCONSUMER_RET_x64FRE_en-us.esd",
            "en-us",
            "Professional",
            "x64",
        )],
    );

    let fetcher = fetcher();
    let catalog = Catalog::from_yaml_str(&catalog_yaml(&server.url())).unwrap();
    let vendor = ProductsXmlCatalog::new(products);
    let results = Resolver::new(&fetcher, &vendor)
        .resolve_all(catalog.entries(), &SilentProgress)
        .unwrap();

    let names: Vec<&str> = results.iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec!["Debian", "Arch Linux", "Vanished", "Tails", "Windows 11", "No Strategy"]
    );

    let debian = results.get("Debian").unwrap().record();
    assert_eq!(
        debian.url,
        Some(format!(
            "{}/debian-cd/12.10.0/amd64/iso-cd/debian-12.10.0-amd64-netinst.iso",
            server.url()
        ))
    );
    assert_eq!(debian.hash_type, Some(HashType::Sha256));
    assert_eq!(debian.hash_value.as_deref(), Some(NETINST_SHA256));
    assert_eq!(debian.version, "12.10.0");
    assert_eq!(debian.size, Some(4096));

    let arch = results.get("Arch Linux").unwrap().record();
    assert_eq!(
        arch.url,
        Some(format!(
            "{}/archlinux/iso/2025.03.01/archlinux-2025.03.01-x86_64.iso",
            server.url()
        ))
    );
    assert_eq!(arch.hash_value.as_deref(), Some(ARCH_SHA256));
    assert_eq!(arch.version, "2025.03.01");
    assert_eq!(arch.size, None);

    let vanished = results.get("Vanished").unwrap();
    assert!(!vanished.is_resolved());
    assert_eq!(vanished.record().url, None);

    let tails = results.get("Tails").unwrap().record();
    assert_eq!(tails.source, RecordSource::Direct);
    assert_eq!(tails.hash_value.as_deref(), Some(NETINST_SHA256));

    let windows = results.get("Windows 11").unwrap().record();
    assert_eq!(windows.source, RecordSource::VendorMetadata);
    assert_eq!(windows.hash_type, Some(HashType::Sha1));
    assert_eq!(
        windows.hash_value.as_deref(),
        Some("da39a3ee5e6b4b0d3255bfef95601890afd80709")
    );
    assert_eq!(windows.version, "26100.1742");

    assert!(!results.get("No Strategy").unwrap().is_resolved());
    assert_eq!(results.resolved_count(), 4);
    assert_eq!(results.failed_count(), 2);
}

#[test]
fn test_parallel_run_writes_identical_file() {
    let (server, _mocks) = mirror();
    let temp_dir = TempDir::new().unwrap();
    let products = write_products_xml(temp_dir.path(), &[]);
    let catalog_path = write_catalog(temp_dir.path(), &catalog_yaml(&server.url()));

    let fetcher = fetcher();
    let catalog = Catalog::load(&catalog_path.to_string_lossy(), &fetcher).unwrap();
    let vendor = ProductsXmlCatalog::new(products);

    let sequential = Resolver::new(&fetcher, &vendor)
        .resolve_all(catalog.entries(), &SilentProgress)
        .unwrap();
    let parallel = Resolver::new(&fetcher, &vendor)
        .with_parallel(4)
        .resolve_all(catalog.entries(), &SilentProgress)
        .unwrap();

    let first = temp_dir.path().join("sequential.json");
    let second = temp_dir.path().join("nested").join("parallel.json");
    write_results(&sequential, &first).unwrap();
    write_results(&parallel, &second).unwrap();

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        to_json_string(&sequential).unwrap()
    );
}

#[test]
fn test_remote_catalog() {
    let (mut server, _mocks) = mirror();
    let body = catalog_yaml(&server.url());
    let _catalog = server
        .mock("GET", "/distros.yaml")
        .with_body(body)
        .create();

    let catalog = Catalog::load(&format!("{}/distros.yaml", server.url()), &fetcher()).unwrap();
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.malformed().count(), 1);
}

#[test]
fn test_walk_too_deep_is_contained() {
    let (server, _mocks) = mirror();
    let temp_dir = TempDir::new().unwrap();
    let vendor = ProductsXmlCatalog::new(temp_dir.path().join("missing.xml"));
    let catalog = Catalog::from_yaml_str(&catalog_yaml(&server.url())).unwrap();

    let fetcher = fetcher();
    let results = Resolver::new(&fetcher, &vendor)
        .with_max_hops(2)
        .resolve_all(catalog.entries(), &SilentProgress)
        .unwrap();

    // Debian needs three hops, Arch one
    assert!(!results.get("Debian").unwrap().is_resolved());
    assert!(results.get("Arch Linux").unwrap().is_resolved());
    // Missing products.xml only affects the Windows entry
    assert!(!results.get("Windows 11").unwrap().is_resolved());
    assert!(results.get("Tails").unwrap().is_resolved());
}
