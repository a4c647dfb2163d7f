//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Upstream payload shaped like the real doctor feed.
pub fn doctors_json() -> String {
    serde_json::json!([
        {
            "id": "101",
            "name": "Dr. Alice Menon",
            "experience": "5 Years of experience",
            "fees": "₹ 100",
            "video_consult": true,
            "in_clinic": false,
            "specialities": [{"name": "Dentist"}],
            "doctor_introduction": "Dr. Alice Menon, BDS, is a dentist",
            "clinic": {"name": "Bright Smiles", "address": {
                "address_line1": "1 Park St", "locality": "Salt Lake", "city": "Kolkata",
                "logo_url": "https://img.example/logo.png"}},
            "languages": ["English", "Bengali"],
            "photo": "https://img.example/alice.png"
        },
        {
            "id": "102",
            "name": "Dr. Bob Iyer",
            "experience": "10 Years of experience",
            "fees": "₹ 50",
            "video_consult": false,
            "in_clinic": true,
            "specialities": [{"name": "ENT"}, {"name": "General Physician"}],
            "doctor_introduction": "Dr. Bob Iyer, MBBS, MS, ENT surgeon",
            "clinic": {"name": "City Clinic", "address": {"locality": "Adyar", "city": "Chennai"}},
            "languages": ["Tamil"]
        },
        {
            "id": "103",
            "name": "Dr. Alina Shah",
            "experience": "12 Years",
            "fees": "₹ 100",
            "video_consult": true,
            "in_clinic": true,
            "specialities": [{"name": "Dentist"}, {"name": "ENT"}]
        },
        {
            "name": "Dr. Carl Dsouza",
            "experience": "unknown",
            "fees": "free",
            "specialities": []
        }
    ])
    .to_string()
}

/// Start a mock upstream that answers every request with `status` and `body`.
/// Returns the bound address.
#[allow(dead_code)]
pub async fn start_mock_upstream(status: u16, body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let body = body.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;

                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
