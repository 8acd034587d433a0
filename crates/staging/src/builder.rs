//! Node and relationship table assembly
//!
//! Ids are handed out by one [`NodeIdAllocator`] threaded through the stages
//! in a fixed order: customers (Customer, Account, Card per row), purchases,
//! merchants, card issuers, and finally the placeholder `Merchant` type node.
//! Each distinct value gets exactly one node; repeated values reuse the id of
//! their first occurrence.

use customernexus_core::{
    GraphTables, NodeRow, NodeTable, RelationshipRow, RelationshipTable, RelationshipType, Result,
};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::{info, warn};

use crate::allocator::NodeIdAllocator;
use crate::entities::{Customer, Purchase, StagedData, Transfer};

/// Label of the node every merchant node points at through `HAS_TYPE`
pub const PLACEHOLDER_MERCHANT_LABEL: &str = "Merchant";

/// Value to node id lookup for one node kind
#[derive(Debug, Clone)]
pub struct IdIndex<K> {
    ids: HashMap<K, i64>,
}

impl<K: Eq + Hash> IdIndex<K> {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
        }
    }

    /// Returns the id and whether it was newly allocated
    fn get_or_allocate(&mut self, key: K, allocator: &mut NodeIdAllocator) -> (i64, bool) {
        if let Some(id) = self.ids.get(&key) {
            return (*id, false);
        }
        let id = allocator.next_id();
        self.ids.insert(key, id);
        (id, true)
    }

    pub fn get(&self, key: &K) -> Option<i64> {
        self.ids.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Customer, Account and Card nodes
#[derive(Debug, Clone)]
pub struct CustomerNodes {
    pub customers: NodeTable,
    pub accounts: NodeTable,
    pub cards: NodeTable,
    pub cif_ids: IdIndex<i64>,
    pub account_ids: IdIndex<i64>,
    pub card_ids: IdIndex<i64>,
}

/// Purchase nodes keyed by transaction id
#[derive(Debug, Clone)]
pub struct PurchaseNodes {
    pub purchases: NodeTable,
    pub purchase_ids: IdIndex<i64>,
}

/// Nodes labelled by a name (merchants, card issuers)
#[derive(Debug, Clone)]
pub struct NamedNodes {
    pub table: NodeTable,
    pub ids: IdIndex<String>,
}

pub fn allocate_customer_nodes(
    customers: &[Customer],
    allocator: &mut NodeIdAllocator,
) -> CustomerNodes {
    let mut nodes = CustomerNodes {
        customers: NodeTable::new("customer"),
        accounts: NodeTable::new("account"),
        cards: NodeTable::new("card"),
        cif_ids: IdIndex::new(),
        account_ids: IdIndex::new(),
        card_ids: IdIndex::new(),
    };

    for customer in customers {
        let (id, is_new) = nodes.cif_ids.get_or_allocate(customer.cif, allocator);
        if is_new {
            nodes.customers.rows.push(
                NodeRow::new(id, "Customer")
                    .with_property("CIF", customer.cif)
                    .with_property("Age", customer.age)
                    .with_property("Gender", customer.gender)
                    .with_property("Latitude", customer.latitude)
                    .with_property("Longitude", customer.longitude),
            );
        }

        let (id, is_new) = nodes
            .account_ids
            .get_or_allocate(customer.account_number, allocator);
        if is_new {
            nodes.accounts.rows.push(
                NodeRow::new(id, "Account").with_property("AccountNumber", customer.account_number),
            );
        }

        let (id, is_new) = nodes.card_ids.get_or_allocate(customer.card_number, allocator);
        if is_new {
            nodes
                .cards
                .rows
                .push(NodeRow::new(id, "Card").with_property("CardNumber", customer.card_number));
        }
    }

    nodes
}

/// Purchase nodes; the `Merchant` property is filled in by [`link_purchase_merchants`]
pub fn allocate_purchase_nodes(
    purchases: &[Purchase],
    allocator: &mut NodeIdAllocator,
) -> PurchaseNodes {
    let mut nodes = PurchaseNodes {
        purchases: NodeTable::new("purchase"),
        purchase_ids: IdIndex::new(),
    };

    for purchase in purchases {
        let (id, is_new) = nodes
            .purchase_ids
            .get_or_allocate(purchase.transaction_id, allocator);
        if is_new {
            nodes.purchases.rows.push(NodeRow::new(id, "Purchase"));
        }
    }

    nodes
}

/// One node per distinct name, labelled with the name itself
pub fn allocate_named_nodes<'a, I>(
    table_name: &str,
    names: I,
    allocator: &mut NodeIdAllocator,
) -> NamedNodes
where
    I: IntoIterator<Item = &'a str>,
{
    let mut nodes = NamedNodes {
        table: NodeTable::new(table_name),
        ids: IdIndex::new(),
    };

    for name in names {
        let (id, is_new) = nodes.ids.get_or_allocate(name.to_string(), allocator);
        if is_new {
            nodes.table.rows.push(NodeRow::new(id, name));
        }
    }

    nodes
}

/// Store each purchase's merchant node id as its `Merchant` property
pub fn link_purchase_merchants(
    purchase_nodes: &mut PurchaseNodes,
    purchases: &[Purchase],
    merchants: &NamedNodes,
) {
    // Rows were pushed in first-occurrence order
    for (row, purchase) in purchase_nodes
        .purchases
        .rows
        .iter_mut()
        .zip(first_occurrences(purchases))
    {
        if let Some(merchant_id) = merchants.ids.get(&purchase.merchant) {
            row.properties
                .insert("Merchant".to_string(), merchant_id.into());
        }
    }
}

/// First row per transaction id, in input order
fn first_occurrences(purchases: &[Purchase]) -> impl Iterator<Item = &Purchase> {
    let mut seen = HashSet::new();
    purchases
        .iter()
        .filter(move |p| seen.insert(p.transaction_id))
}

/// Push a relationship unless it is a repeat of an earlier one
fn push_unique(
    table: &mut RelationshipTable,
    seen: &mut HashSet<(i64, i64)>,
    source: i64,
    target: i64,
) {
    if seen.insert((source, target)) {
        table.rows.push(RelationshipRow::new(source, target));
    }
}

fn customer_relationships(
    customers: &[Customer],
    nodes: &CustomerNodes,
) -> (RelationshipTable, RelationshipTable) {
    let mut has_account = RelationshipTable::new(RelationshipType::HasAccount);
    let mut has_card = RelationshipTable::new(RelationshipType::HasCard);
    let mut seen_accounts = HashSet::new();
    let mut seen_cards = HashSet::new();

    for customer in customers {
        let ids = (
            nodes.cif_ids.get(&customer.cif),
            nodes.account_ids.get(&customer.account_number),
            nodes.card_ids.get(&customer.card_number),
        );
        if let (Some(customer_id), Some(account_id), Some(card_id)) = ids {
            push_unique(&mut has_account, &mut seen_accounts, customer_id, account_id);
            push_unique(&mut has_card, &mut seen_cards, customer_id, card_id);
        }
    }

    (has_account, has_card)
}

fn transfer_relationships(transfers: &[Transfer], account_ids: &IdIndex<i64>) -> RelationshipTable {
    let mut table = RelationshipTable::new(RelationshipType::Transfer);
    let mut dropped = 0usize;

    for transfer in transfers {
        let sender = account_ids.get(&transfer.sender_account_number);
        let receiver = account_ids.get(&transfer.receiver_account_number);
        match (sender, receiver) {
            (Some(sender), Some(receiver)) => table.rows.push(
                RelationshipRow::new(sender, receiver)
                    .with_property("transactionId", transfer.transaction_id)
                    .with_property("transactionAmount", transfer.amount)
                    .with_property("transferEpoch", transfer.transfer_epoch),
            ),
            _ => {
                dropped += 1;
                warn!(
                    transaction_id = transfer.transaction_id,
                    sender = transfer.sender_account_number,
                    receiver = transfer.receiver_account_number,
                    "Transfer references an account with no customer, skipping"
                );
            }
        }
    }

    if dropped > 0 {
        warn!("Skipped {dropped}/{} transfers with unknown accounts", transfers.len());
    }
    table
}

struct PurchaseRelationships {
    purchase: RelationshipTable,
    has_merchant: RelationshipTable,
    has_card_issuer: RelationshipTable,
}

fn purchase_relationships(
    purchases: &[Purchase],
    card_ids: &IdIndex<i64>,
    purchase_nodes: &PurchaseNodes,
    merchants: &NamedNodes,
    card_issuers: &NamedNodes,
) -> PurchaseRelationships {
    let mut rels = PurchaseRelationships {
        purchase: RelationshipTable::new(RelationshipType::Purchase),
        has_merchant: RelationshipTable::new(RelationshipType::HasMerchant),
        has_card_issuer: RelationshipTable::new(RelationshipType::HasCardIssuer),
    };
    let mut seen_issuers = HashSet::new();
    let mut unknown_cards = 0usize;

    for purchase in first_occurrences(purchases) {
        let card_id = card_ids.get(&purchase.card_number);
        let purchase_id = purchase_nodes.purchase_ids.get(&purchase.transaction_id);
        let merchant_id = merchants.ids.get(&purchase.merchant);
        let issuer_id = card_issuers.ids.get(&purchase.card_issuer);

        if let (Some(purchase_id), Some(merchant_id)) = (purchase_id, merchant_id) {
            rels.has_merchant
                .rows
                .push(RelationshipRow::new(purchase_id, merchant_id));
        }

        let Some(card_id) = card_id else {
            unknown_cards += 1;
            warn!(
                transaction_id = purchase.transaction_id,
                card = purchase.card_number,
                "Purchase made with a card that has no customer, skipping card links"
            );
            continue;
        };

        if let Some(purchase_id) = purchase_id {
            rels.purchase.rows.push(
                RelationshipRow::new(card_id, purchase_id)
                    .with_property("purchaseId", purchase.transaction_id)
                    .with_property("purchaseAmount", purchase.amount)
                    .with_property("purchaseEpoch", purchase.purchase_epoch),
            );
        }

        if let Some(issuer_id) = issuer_id {
            push_unique(
                &mut rels.has_card_issuer,
                &mut seen_issuers,
                card_id,
                issuer_id,
            );
        }
    }

    if unknown_cards > 0 {
        warn!("{unknown_cards} purchases reference unknown cards");
    }
    rels
}

/// Build and validate every table for one bulk construct
pub fn build_graph_tables(
    data: &StagedData,
    allocator: &mut NodeIdAllocator,
) -> Result<GraphTables> {
    let customer_nodes = allocate_customer_nodes(&data.customers, allocator);
    let mut purchase_nodes = allocate_purchase_nodes(&data.purchases, allocator);
    let merchants = allocate_named_nodes(
        "merchant",
        data.purchases.iter().map(|p| p.merchant.as_str()),
        allocator,
    );
    let card_issuers = allocate_named_nodes(
        "card_issuer",
        data.purchases.iter().map(|p| p.card_issuer.as_str()),
        allocator,
    );
    let placeholder_id = allocator.next_id();

    link_purchase_merchants(&mut purchase_nodes, &data.purchases, &merchants);

    let (has_account, has_card) = customer_relationships(&data.customers, &customer_nodes);
    let transfer = transfer_relationships(&data.transfers, &customer_nodes.account_ids);

    let mut has_type = RelationshipTable::new(RelationshipType::HasType);
    has_type.rows = merchants
        .table
        .rows
        .iter()
        .map(|merchant| RelationshipRow::new(merchant.node_id, placeholder_id))
        .collect();

    let purchase_rels = purchase_relationships(
        &data.purchases,
        &customer_nodes.card_ids,
        &purchase_nodes,
        &merchants,
        &card_issuers,
    );

    let mut merchant_table = merchants.table;
    merchant_table
        .rows
        .push(NodeRow::new(placeholder_id, PLACEHOLDER_MERCHANT_LABEL));

    let tables = GraphTables {
        nodes: vec![
            customer_nodes.customers,
            customer_nodes.accounts,
            customer_nodes.cards,
            purchase_nodes.purchases,
            merchant_table,
            card_issuers.table,
        ],
        relationships: vec![
            has_account,
            transfer,
            has_card,
            has_type,
            purchase_rels.purchase,
            purchase_rels.has_merchant,
            purchase_rels.has_card_issuer,
        ],
    };

    tables.validate()?;

    info!(
        "Staged {} nodes and {} relationships ({} ids allocated)",
        tables.node_count(),
        tables.relationship_count(),
        allocator.allocated()
    );

    Ok(tables)
}
