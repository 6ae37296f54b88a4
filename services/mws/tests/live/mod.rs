// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::env;

use anyhow::Result;
use log::{debug, warn};
use mwsign_core::{Context, OsEnv};
use mwsign_http_send_reqwest::ReqwestHttpSend;
use mwsign_mws::endpoint::orders;
use mwsign_mws::{ArrayPrefixes, Client, Config, Output, Params, Settings};
use mwsign_sleep_tokio::TokioSleep;

fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("MWSIGN_MWS_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_sleep(TokioSleep)
        .with_env(OsEnv);

    Some(
        Client::from_config(ctx, Config::default(), Settings::default())
            .expect("MWS_* env must be set"),
    )
}

#[tokio::test]
async fn test_get_service_status() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("MWSIGN_MWS_TEST is not set, skipped");
        return Ok(());
    };

    let options = client.create_options(
        &orders::GET_SERVICE_STATUS,
        &Params::new(),
        &ArrayPrefixes::new(),
    );
    let output = client.create_request(&options).await?;
    debug!("got output: {output:?}");

    let Output::Structured(v) = output else {
        panic!("structured output expected");
    };
    assert!(v.get("Status").is_some());
    Ok(())
}
