#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tiny_http::{Header, Response, Server};
use zip::write::SimpleFileOptions;

use modpack_server_lib::core::downloader::ArtifactFetcher;
use modpack_server_lib::core::http::build_http_client;
use modpack_server_lib::core::modpack::{ModLoaderEntry, ModReference, ModpackManifest};
use modpack_server_lib::core::settings::InstallerSettings;

#[derive(Clone)]
pub enum Route {
    File(Vec<u8>),
    /// Redirect to a path on the same host, or to an absolute URL.
    Redirect(String),
    Status(u16),
}

/// Local stand-in for the mod host and the loader Maven.
pub struct MockHost {
    pub base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl MockHost {
    pub fn start(routes: impl IntoIterator<Item = (String, Route)>) -> Self {
        let routes: HashMap<String, Route> = routes.into_iter().collect();

        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let base = format!("http://127.0.0.1:{}", port);
        let hits = Arc::new(Mutex::new(Vec::new()));

        let thread_hits = Arc::clone(&hits);
        let thread_base = base.clone();
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let path = request.url().to_string();
                thread_hits.lock().unwrap().push(path.clone());

                let _ = match routes.get(&path) {
                    Some(Route::File(bytes)) => request.respond(Response::from_data(bytes.clone())),
                    Some(Route::Redirect(target)) => {
                        let location = if target.starts_with("http") {
                            target.clone()
                        } else {
                            format!("{}{}", thread_base, target)
                        };
                        let header =
                            Header::from_bytes(&b"Location"[..], location.as_bytes()).unwrap();
                        request.respond(Response::empty(302).with_header(header))
                    }
                    Some(Route::Status(code)) => request.respond(Response::empty(*code)),
                    None => request.respond(Response::empty(404)),
                };
            }
        });

        Self { base, hits }
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn settings(&self) -> InstallerSettings {
        InstallerSettings {
            mod_host: self.base.clone(),
            forge_maven: format!("{}/forge-maven", self.base),
            neoforge_maven: format!("{}/neoforge-maven", self.base),
            client_denylist: Vec::new(),
            ..InstallerSettings::default()
        }
    }

    pub fn fetcher(&self) -> ArtifactFetcher {
        ArtifactFetcher::new(build_http_client("modpack-server-tests").unwrap(), self.base.clone())
    }
}

/// Server that answers every request with `200 OK`, announces
/// `declared_len` bytes, sends `body` and closes the connection.
///
/// Returns the server's base URL.
pub fn truncated_body_server(declared_len: usize, body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/java-archive\r\nConnection: close\r\n\r\n",
                declared_len
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
            let _ = stream.flush();
        }
    });

    base
}

pub fn download_path(project_id: u32, file_id: u32) -> String {
    format!("/api/v1/mods/{}/files/{}/download", project_id, file_id)
}

/// Routes serving `bytes` as `file_name` behind the generic download endpoint.
pub fn mod_routes(project_id: u32, file_id: u32, file_name: &str, bytes: Vec<u8>) -> Vec<(String, Route)> {
    let cdn_path = format!("/files/{}/{}", file_id, file_name);
    vec![
        (download_path(project_id, file_id), Route::Redirect(cdn_path.clone())),
        (cdn_path, Route::File(bytes)),
    ]
}

pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, SimpleFileOptions::default())
                .unwrap();
        } else {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

pub fn forge_jar(mod_id: &str) -> Vec<u8> {
    let toml = format!("modLoader=\"javafml\"\n[[mods]]\nmodId = \"{}\"\n", mod_id);
    zip_bytes(&[("META-INF/mods.toml", toml.as_bytes())])
}

pub fn fabric_jar(mod_id: &str, environment: &str) -> Vec<u8> {
    let json = format!(
        r#"{{"schemaVersion":1,"id":"{}","environment":"{}"}}"#,
        mod_id, environment
    );
    zip_bytes(&[("fabric.mod.json", json.as_bytes())])
}

pub fn manifest(loader: Option<&str>, refs: Vec<ModReference>) -> ModpackManifest {
    ModpackManifest {
        name: "Test Pack".into(),
        display_version: "1.0.0".into(),
        author: "tests".into(),
        minecraft_version: "1.20.1".into(),
        mod_loaders: loader
            .map(|id| {
                vec![ModLoaderEntry {
                    id: id.to_string(),
                    is_primary: true,
                }]
            })
            .unwrap_or_default(),
        mod_references: refs,
        overrides_relative_path: None,
    }
}

pub fn reference(project_id: u32, file_id: u32, required: bool) -> ModReference {
    ModReference {
        project_id,
        file_id,
        required,
    }
}

pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
