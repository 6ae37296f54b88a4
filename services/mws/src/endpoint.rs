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

//! Endpoint descriptors and the tables of well-known operations.

use std::borrow::Cow;

use http::Method;

/// Endpoint describes one logical remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Resource group path, for example `Orders`.
    pub resource_path: Cow<'static, str>,
    /// Api version of the resource group, for example `2013-09-01`.
    pub api_version: Cow<'static, str>,
    /// Action name, for example `ListOrders`.
    pub action: Cow<'static, str>,
    /// HTTP method used to send the request.
    pub method: Method,
    /// Send the seller id as `Merchant` instead of `SellerId`.
    pub merchant_discriminated: bool,
}

impl Endpoint {
    /// Create an endpoint sent with `POST` and identified by `SellerId`.
    pub fn new(
        resource_path: impl Into<Cow<'static, str>>,
        api_version: impl Into<Cow<'static, str>>,
        action: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            resource_path: resource_path.into(),
            api_version: api_version.into(),
            action: action.into(),
            method: Method::POST,
            merchant_discriminated: false,
        }
    }

    /// Set the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Identify the seller with `Merchant` instead of `SellerId`.
    pub fn with_merchant_discrimination(mut self, merchant_discriminated: bool) -> Self {
        self.merchant_discriminated = merchant_discriminated;
        self
    }

    /// Path of this endpoint: `/{resource_path}/{api_version}`.
    ///
    /// Leading and trailing slashes of both segments are ignored so that
    /// exactly one separator ends up between them. Empty segments are skipped.
    pub fn path(&self) -> String {
        let mut path = String::with_capacity(self.resource_path.len() + self.api_version.len() + 2);
        for segment in [&self.resource_path, &self.api_version] {
            let segment = segment.trim_matches('/');
            if segment.is_empty() {
                continue;
            }
            path.push('/');
            path.push_str(segment);
        }
        if path.is_empty() {
            path.push('/');
        }

        path
    }

    const fn post(
        resource_path: &'static str,
        api_version: &'static str,
        action: &'static str,
    ) -> Self {
        Self {
            resource_path: Cow::Borrowed(resource_path),
            api_version: Cow::Borrowed(api_version),
            action: Cow::Borrowed(action),
            method: Method::POST,
            merchant_discriminated: false,
        }
    }
}

/// Prefixes used to flatten array parameters of an operation.
///
/// Keys are logical parameter names, values are the prefixes the remote expects.
pub type ArrayPrefixes = std::collections::HashMap<String, String>;

fn prefixes(pairs: &[(&str, &str)]) -> ArrayPrefixes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Orders API, version `2013-09-01`.
pub mod orders {
    use super::*;

    const PATH: &str = "Orders";
    const VERSION: &str = "2013-09-01";

    #[allow(missing_docs)]
    pub const LIST_ORDERS: Endpoint = Endpoint::post(PATH, VERSION, "ListOrders");
    #[allow(missing_docs)]
    pub const LIST_ORDERS_BY_NEXT_TOKEN: Endpoint =
        Endpoint::post(PATH, VERSION, "ListOrdersByNextToken");
    #[allow(missing_docs)]
    pub const GET_ORDER: Endpoint = Endpoint::post(PATH, VERSION, "GetOrder");
    #[allow(missing_docs)]
    pub const LIST_ORDER_ITEMS: Endpoint = Endpoint::post(PATH, VERSION, "ListOrderItems");
    #[allow(missing_docs)]
    pub const LIST_ORDER_ITEMS_BY_NEXT_TOKEN: Endpoint =
        Endpoint::post(PATH, VERSION, "ListOrderItemsByNextToken");
    #[allow(missing_docs)]
    pub const GET_SERVICE_STATUS: Endpoint = Endpoint::post(PATH, VERSION, "GetServiceStatus");

    /// Array prefixes of `ListOrders`.
    pub fn list_orders_prefixes() -> ArrayPrefixes {
        prefixes(&[
            ("MarketplaceId", "MarketplaceId.Id."),
            ("OrderStatus", "OrderStatus.Status."),
            ("FulfillmentChannel", "FulfillmentChannel.Channel."),
            ("PaymentMethod", "PaymentMethod.Method."),
            ("TFMShipmentStatus", "TFMShipmentStatus.Status."),
        ])
    }

    /// Array prefixes of `GetOrder`.
    pub fn get_order_prefixes() -> ArrayPrefixes {
        prefixes(&[("AmazonOrderId", "AmazonOrderId.Id.")])
    }
}

/// Sellers API, version `2011-07-01`.
pub mod sellers {
    use super::*;

    const PATH: &str = "Sellers";
    const VERSION: &str = "2011-07-01";

    #[allow(missing_docs)]
    pub const LIST_MARKETPLACE_PARTICIPATIONS: Endpoint =
        Endpoint::post(PATH, VERSION, "ListMarketplaceParticipations");
    #[allow(missing_docs)]
    pub const LIST_MARKETPLACE_PARTICIPATIONS_BY_NEXT_TOKEN: Endpoint =
        Endpoint::post(PATH, VERSION, "ListMarketplaceParticipationsByNextToken");
    #[allow(missing_docs)]
    pub const GET_SERVICE_STATUS: Endpoint = Endpoint::post(PATH, VERSION, "GetServiceStatus");
}

/// Products API, version `2011-10-01`.
pub mod products {
    use super::*;

    const PATH: &str = "Products";
    const VERSION: &str = "2011-10-01";

    #[allow(missing_docs)]
    pub const LIST_MATCHING_PRODUCTS: Endpoint =
        Endpoint::post(PATH, VERSION, "ListMatchingProducts");
    #[allow(missing_docs)]
    pub const GET_MATCHING_PRODUCT: Endpoint = Endpoint::post(PATH, VERSION, "GetMatchingProduct");
    #[allow(missing_docs)]
    pub const GET_MATCHING_PRODUCT_FOR_ID: Endpoint =
        Endpoint::post(PATH, VERSION, "GetMatchingProductForId");
    #[allow(missing_docs)]
    pub const GET_COMPETITIVE_PRICING_FOR_SKU: Endpoint =
        Endpoint::post(PATH, VERSION, "GetCompetitivePricingForSKU");
    #[allow(missing_docs)]
    pub const GET_COMPETITIVE_PRICING_FOR_ASIN: Endpoint =
        Endpoint::post(PATH, VERSION, "GetCompetitivePricingForASIN");
    #[allow(missing_docs)]
    pub const GET_MY_PRICE_FOR_SKU: Endpoint = Endpoint::post(PATH, VERSION, "GetMyPriceForSKU");
    #[allow(missing_docs)]
    pub const GET_SERVICE_STATUS: Endpoint = Endpoint::post(PATH, VERSION, "GetServiceStatus");

    /// Array prefixes shared by the ASIN based operations.
    pub fn asin_prefixes() -> ArrayPrefixes {
        prefixes(&[("ASINList", "ASINList.ASIN.")])
    }

    /// Array prefixes shared by the SKU based operations.
    pub fn sku_prefixes() -> ArrayPrefixes {
        prefixes(&[("SellerSKUList", "SellerSKUList.SellerSKU.")])
    }

    /// Array prefixes of `GetMatchingProductForId`.
    pub fn id_prefixes() -> ArrayPrefixes {
        prefixes(&[("IdList", "IdList.Id.")])
    }
}

/// Fulfillment Inventory API, version `2010-10-01`.
pub mod fulfillment_inventory {
    use super::*;

    const PATH: &str = "FulfillmentInventory";
    const VERSION: &str = "2010-10-01";

    #[allow(missing_docs)]
    pub const LIST_INVENTORY_SUPPLY: Endpoint =
        Endpoint::post(PATH, VERSION, "ListInventorySupply");
    #[allow(missing_docs)]
    pub const LIST_INVENTORY_SUPPLY_BY_NEXT_TOKEN: Endpoint =
        Endpoint::post(PATH, VERSION, "ListInventorySupplyByNextToken");
    #[allow(missing_docs)]
    pub const GET_SERVICE_STATUS: Endpoint = Endpoint::post(PATH, VERSION, "GetServiceStatus");

    /// Array prefixes of `ListInventorySupply`.
    pub fn list_inventory_supply_prefixes() -> ArrayPrefixes {
        prefixes(&[("SellerSkus", "SellerSkus.member.")])
    }
}

/// Finances API, version `2015-05-01`.
pub mod finances {
    use super::*;

    const PATH: &str = "Finances";
    const VERSION: &str = "2015-05-01";

    #[allow(missing_docs)]
    pub const LIST_FINANCIAL_EVENT_GROUPS: Endpoint =
        Endpoint::post(PATH, VERSION, "ListFinancialEventGroups");
    #[allow(missing_docs)]
    pub const LIST_FINANCIAL_EVENTS: Endpoint =
        Endpoint::post(PATH, VERSION, "ListFinancialEvents");
    #[allow(missing_docs)]
    pub const GET_SERVICE_STATUS: Endpoint = Endpoint::post(PATH, VERSION, "GetServiceStatus");
}
