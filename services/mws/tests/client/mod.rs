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

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use mwsign_core::{Context, ErrorKind, HttpSend, StaticEnv};
use mwsign_mws::endpoint::orders;
use mwsign_mws::{
    ArrayPrefixes, Client, Config, EnvCredentialProvider, Output, ParamValue, Params,
    ResponseFormat, Seller, Settings, StaticCredentialProvider,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::mock::*;

const LIST_ORDERS_OK: &str = r#"<?xml version="1.0"?>
<ListOrdersResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <ListOrdersResult>
    <Orders>
      <Order>
        <AmazonOrderId>902-3159896-1390916</AmazonOrderId>
        <OrderStatus>Shipped</OrderStatus>
        <NumberOfItemsShipped>1</NumberOfItemsShipped>
      </Order>
    </Orders>
  </ListOrdersResult>
  <ResponseMetadata>
    <RequestId>88faca76-b600-46d2-b53c-0c8c4533e43a</RequestId>
  </ResponseMetadata>
</ListOrdersResponse>"#;

fn list_orders_params() -> Params {
    Params::from([
        (
            "CreatedAfter".to_string(),
            ParamValue::from("2020-01-01T00:00:00Z"),
        ),
        (
            "MarketplaceId".to_string(),
            ParamValue::from(vec!["ATVPDKIKX0DER"]),
        ),
        (
            "OrderStatus".to_string(),
            ParamValue::from(vec!["Unshipped", "PartiallyShipped"]),
        ),
        ("MaxResultsPerPage".to_string(), ParamValue::from(50i64)),
        ("NextToken".to_string(), ParamValue::Null),
    ])
}

#[tokio::test]
async fn test_structured_output() -> Result<()> {
    let (client, http, _) = scripted_client([Step::ok(LIST_ORDERS_OK)], Settings::default());

    let params = list_orders_params();
    let before = params.clone();
    let options =
        client.create_options(&orders::LIST_ORDERS, &params, &orders::list_orders_prefixes());
    let output = client.create_request(&options).await?;

    assert_eq!(
        output,
        Output::Structured(json!({
            "Orders": {
                "Order": {
                    "AmazonOrderId": "902-3159896-1390916",
                    "OrderStatus": "Shipped",
                    "NumberOfItemsShipped": 1
                }
            }
        }))
    );
    assert_eq!(params, before, "caller parameters must stay unchanged");

    let req = &http.requests()[0];
    assert_eq!(req.param("OrderStatus.Status.1").as_deref(), Some("Unshipped"));
    assert_eq!(req.param("OrderStatus.Status.2").as_deref(), Some("PartiallyShipped"));
    assert_eq!(req.param("MarketplaceId.Id.1").as_deref(), Some("ATVPDKIKX0DER"));
    assert_eq!(req.param("MaxResultsPerPage").as_deref(), Some("50"));
    assert_eq!(req.param("NextToken"), None);
    Ok(())
}

#[tokio::test]
async fn test_raw_output() -> Result<()> {
    let (client, _, _) = scripted_client(
        [Step::ok(LIST_ORDERS_OK)],
        Settings::default().with_response_format(ResponseFormat::Raw),
    );

    let options = client.create_options(
        &orders::LIST_ORDERS,
        &list_orders_params(),
        &orders::list_orders_prefixes(),
    );
    let Output::Raw(body) = client.create_request(&options).await? else {
        panic!("raw output expected");
    };
    assert_eq!(body, LIST_ORDERS_OK);

    let tree = mwsign_mws::decode::decode_document(&body)?;
    assert_eq!(
        tree["ListOrdersResponse"]["ResponseMetadata"]["RequestId"],
        "88faca76-b600-46d2-b53c-0c8c4533e43a"
    );
    Ok(())
}

#[tokio::test]
async fn test_error_envelope_with_ok_status() {
    let (client, http, _) = scripted_client(
        [Step::error(200, "InvalidParameterValue")],
        Settings::default(),
    );

    let options =
        client.create_options(&orders::LIST_ORDERS, &Params::new(), &ArrayPrefixes::new());
    let err = client.create_request(&options).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UndefinedRemote);
    assert_eq!(
        err.response().and_then(|r| r.code.as_deref()),
        Some("InvalidParameterValue")
    );
    assert_eq!(http.count(), 1);
}

#[tokio::test]
async fn test_missing_result_is_malformed() {
    let (client, _, _) = scripted_client(
        [Step::ok("<ListOrdersResponse><Other/></ListOrdersResponse>")],
        Settings::default(),
    );

    let options =
        client.create_options(&orders::LIST_ORDERS, &Params::new(), &ArrayPrefixes::new());
    let err = client.create_request(&options).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

/// Responds with the seller id and host it received so the caller can check
/// that both come from the same configuration.
#[derive(Debug)]
struct EchoHttpSend;

#[async_trait]
impl HttpSend for EchoHttpSend {
    async fn http_send(
        &self,
        req: http::Request<Bytes>,
    ) -> mwsign_core::Result<http::Response<Bytes>> {
        let host = req.headers()[http::header::HOST]
            .to_str()
            .unwrap_or_default()
            .to_string();
        let seller = param(req.body(), "SellerId").unwrap_or_default();
        tokio::task::yield_now().await;

        let body = format!(
            "<GetServiceStatusResponse><GetServiceStatusResult>\
             <Host>{host}</Host><Seller>{seller}</Seller>\
             </GetServiceStatusResult></GetServiceStatusResponse>"
        );
        Ok(http::Response::new(Bytes::from(body)))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reconfiguration_sees_whole_snapshots() -> Result<()> {
    let ctx = Context::new().with_http_send(EchoHttpSend);
    let us = Seller::new("SELLERUS", "US")?;
    let de = Seller::new("SELLERDE", "DE")?;
    let client = Client::new(ctx, credential(), us.clone(), Settings::default());

    let writer = {
        let client = client.clone();
        let (us, de) = (us.clone(), de.clone());
        tokio::spawn(async move {
            for i in 0..200 {
                client.configure_seller(if i % 2 == 0 { de.clone() } else { us.clone() });
                tokio::task::yield_now().await;
            }
        })
    };

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move {
                let options = client.create_options(
                    &orders::GET_SERVICE_STATUS,
                    &Params::new(),
                    &ArrayPrefixes::new(),
                );
                let mut seen = Vec::new();
                for _ in 0..25 {
                    let Output::Structured(v) = client.create_request(&options).await? else {
                        anyhow::bail!("structured output expected");
                    };
                    seen.push((v["Host"].clone(), v["Seller"].clone()));
                }
                Ok::<_, anyhow::Error>(seen)
            })
        })
        .collect();

    writer.await?;
    let expected = HashMap::from([
        ("mws.amazonservices.com", "SELLERUS"),
        ("mws-eu.amazonservices.com", "SELLERDE"),
    ]);
    for reader in readers {
        for (host, seller) in reader.await?? {
            let host = host.as_str().unwrap_or_default();
            assert_eq!(expected.get(host).copied(), seller.as_str(), "host {host}");
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_from_provider() -> Result<()> {
    let ctx = Context::new();
    let provider = StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY);
    let client =
        Client::from_provider(ctx.clone(), &provider, seller(), Settings::default()).await?;
    assert_eq!(client.seller().id(), SELLER_ID);

    let provider = EnvCredentialProvider::new();
    let err = Client::from_provider(ctx, &provider, seller(), Settings::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    Ok(())
}

#[tokio::test]
async fn test_from_config_and_configure_area() -> Result<()> {
    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([
            ("MWS_ACCESS_KEY_ID".to_string(), ACCESS_KEY_ID.to_string()),
            ("MWS_SECRET_ACCESS_KEY".to_string(), SECRET_ACCESS_KEY.to_string()),
            ("MWS_SELLER_ID".to_string(), SELLER_ID.to_string()),
            ("MWS_REGION".to_string(), "CA".to_string()),
        ]),
    });
    let client = Client::from_config(ctx, Config::default(), Settings::default())?;
    assert_eq!(client.marketplace_id(), "A2EUQ1WTGCTBG2");

    client.configure_area("MX")?;
    let options = client.create_options(
        &orders::GET_SERVICE_STATUS,
        &Params::new(),
        &ArrayPrefixes::new(),
    );
    let req = client.create_signed_request(&options)?;
    assert_eq!(req.headers()[http::header::HOST], "mws.amazonservices.com.mx");
    Ok(())
}
