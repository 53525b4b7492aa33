// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Entry point to the rides service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use rides::serve;
use rides_core::env::get_optional_var;
use std::net::Ipv4Addr;

/// Prefix of all environment variables that configure the service.
const ENV_PREFIX: &str = "RIDES";

#[tokio::main]
async fn main() {
    env_logger::init();

    let port = get_optional_var::<u16>(ENV_PREFIX, "PORT").unwrap().unwrap_or(8010);
    let address = get_optional_var::<Ipv4Addr>(ENV_PREFIX, "ADDRESS")
        .unwrap()
        .unwrap_or(Ipv4Addr::LOCALHOST);
    let db_conn = get_optional_var::<String>(ENV_PREFIX, "DATABASE")
        .unwrap()
        .unwrap_or_else(|| "sqlite::memory:".to_owned());

    serve((address, port), &db_conn).await.unwrap()
}
