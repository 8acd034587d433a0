//! The fixed catalog of analytical queries offered by the menu
//!
//! Statements reference the PageRank and community properties through the
//! `{pagerank}` and `{community}` placeholders, filled in from
//! [`AnalyticsConfig`] by [`AnalyticsQuery::render`].

use customernexus_core::AnalyticsConfig;

const PAGERANK_PLACEHOLDER: &str = "{pagerank}";
const COMMUNITY_PLACEHOLDER: &str = "{community}";

/// One numbered menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub number: u8,
    /// Name logged ahead of the results, e.g. `QUERY-1`
    pub name: &'static str,
    /// One-line menu text
    pub summary: &'static str,
    pub description: &'static str,
    pub cypher: &'static str,
    /// Returned columns, in output order
    pub columns: &'static [&'static str],
}

impl AnalyticsQuery {
    /// Statement text with property placeholders substituted
    pub fn render(&self, config: &AnalyticsConfig) -> String {
        self.cypher
            .replace(PAGERANK_PLACEHOLDER, &config.pagerank_property)
            .replace(COMMUNITY_PLACEHOLDER, &config.community_property)
    }
}

/// Look up a query by its menu number
pub fn find_query(number: u8) -> Option<&'static AnalyticsQuery> {
    QUERY_CATALOG.iter().find(|q| q.number == number)
}

pub const QUERY_CATALOG: [AnalyticsQuery; 9] = [
    AnalyticsQuery {
        number: 1,
        name: "QUERY-1",
        summary: "Calculate total expenditure of each customer based on purchase history.",
        description: "The query calculates the total expenditure of each customer, based on \
            their purchase history. It offers a quick overview of customer spending patterns.",
        cypher: "
            MATCH (c:Customer)-[:HAS_CARD]->(:Card)-[p:PURCHASE]->(:Purchase)
            RETURN c.CIF AS CIF, ROUND(SUM(p.purchaseAmount), 2) AS TotalExpenditure
            ORDER BY TotalExpenditure DESC",
        columns: &["CIF", "TotalExpenditure"],
    },
    AnalyticsQuery {
        number: 2,
        name: "QUERY-2",
        summary: "Calculate total expenditure by merchant for each customer.",
        description: "The query calculates the total expenditure of each customer together with \
            the number of purchases made at every merchant, showing where each customer spends.",
        cypher: "
            MATCH (c:Customer)-[:HAS_CARD]->(card)-[r:PURCHASE]->(purchase)-[:HAS_MERCHANT]->(merchant)
            WITH c.CIF AS CustomerID,
                 COLLECT(labels(merchant)) AS MerchantNames,
                 ROUND(SUM(r.purchaseAmount), 2) AS TotalExpenditure
            WITH CustomerID, apoc.coll.flatten(MerchantNames) AS MerchantNames, TotalExpenditure
            WITH CustomerID, apoc.coll.frequencies(MerchantNames) AS MerchantFrequencies, TotalExpenditure
            UNWIND MerchantFrequencies AS output
            WITH CustomerID, output.item + ':' + output.count AS MerchantCount, TotalExpenditure
            RETURN CustomerID, COLLECT(MerchantCount) AS MerchantCounts, TotalExpenditure
            ORDER BY TotalExpenditure DESC",
        columns: &["CustomerID", "MerchantCounts", "TotalExpenditure"],
    },
    AnalyticsQuery {
        number: 3,
        name: "QUERY-3",
        summary: "Count customers purchasing at the specified merchant in 2021, grouped by month.",
        description: "The query filters purchases made at the specified merchant in the year \
            2021, then groups them by month. It provides a monthly count of unique customers who \
            made purchases at this merchant, giving quick insight into customer engagement over time.",
        cypher: "
            MATCH (n)<-[:HAS_MERCHANT]-(p:Purchase)-[r:PURCHASE]-(x)
            WHERE 'Facebook' IN labels(n)
            WITH p, r, datetime({epochMillis: toInteger(r.purchaseEpoch) * 1000}) AS purchaseDateTime
            WHERE purchaseDateTime.year = 2021
            WITH p, purchaseDateTime.month AS purchaseMonth
            MATCH (p)-[:PURCHASE]-(:Card)-[:HAS_CARD]-(c:Customer)
            RETURN purchaseMonth AS Month, COUNT(DISTINCT c) AS TotalCount
            ORDER BY purchaseMonth",
        columns: &["Month", "TotalCount"],
    },
    AnalyticsQuery {
        number: 4,
        name: "QUERY-4",
        summary: "Calculate transfer statistics and anomaly flags for each sender account.",
        description: "The query calculates transfer amount statistics for sender accounts at the \
            first hop of the network and flags accounts whose mean, median or standard deviation \
            departs from the overall figures by more than 1000. An account is marked anomalous \
            when all three flags are raised.",
        cypher: "
            MATCH ()-[r:TRANSFER]->()
            WITH r.transactionAmount AS allAmounts
            WITH AVG(allAmounts) AS OverallMean,
                 percentileCont(allAmounts, 0.5) AS OverallMedian,
                 STDEV(allAmounts) AS OverallStdDev
            MATCH (sender:Account)-[r:TRANSFER]->(receiver:Account)
            WITH sender, r.transactionAmount AS amounts, OverallMean, OverallMedian, OverallStdDev
            WITH sender, amounts, OverallMean, OverallMedian, OverallStdDev,
                 CASE WHEN ABS(AVG(amounts) - OverallMean) > 1000 THEN 1 ELSE 0 END AS MeanAnomalyScore,
                 CASE WHEN ABS(percentileCont(amounts, 0.5) - OverallMedian) > 1000 THEN 1 ELSE 0 END AS MedianAnomalyScore,
                 CASE WHEN ABS(STDEV(amounts) - OverallMean) > 1000 THEN 1 ELSE 0 END AS StdDevAnomalyScore
            RETURN sender.AccountNumber AS SenderAccountNumber,
                   COUNT(amounts) AS TransactionCount,
                   AVG(amounts) AS MeanTransactionAmount,
                   percentileCont(amounts, 0.5) AS MedianTransactionAmount,
                   STDEV(amounts) AS StandardDeviationTransactionAmount,
                   OverallMean AS OverallMeanTransactionAmount,
                   OverallMedian AS OverallMedianTransactionAmount,
                   OverallStdDev AS OverallStandardDeviationTransactionAmount,
                   MeanAnomalyScore,
                   MedianAnomalyScore,
                   StdDevAnomalyScore,
                   CASE
                       WHEN MeanAnomalyScore = 1 AND MedianAnomalyScore = 1 AND StdDevAnomalyScore = 1 THEN 1
                       ELSE 0
                   END AS Anomaly
            ORDER BY Anomaly DESC",
        columns: &[
            "SenderAccountNumber",
            "TransactionCount",
            "MeanTransactionAmount",
            "MedianTransactionAmount",
            "StandardDeviationTransactionAmount",
            "OverallMeanTransactionAmount",
            "OverallMedianTransactionAmount",
            "OverallStandardDeviationTransactionAmount",
            "MeanAnomalyScore",
            "MedianAnomalyScore",
            "StdDevAnomalyScore",
            "Anomaly",
        ],
    },
    AnalyticsQuery {
        number: 5,
        name: "QUERY-5",
        summary: "Find transfer cycles involving the 10 accounts with the highest PageRank.",
        description: "The query selects the top 10 accounts by PageRank and finds TRANSFER cycles \
            of depth up to 10 through these influential accounts. Closed loops, where money \
            returns to the account it left, can indicate attempts to obscure the flow of funds.",
        cypher: "
            MATCH (a:Account)
            WITH a
            ORDER BY a.{pagerank} DESC
            LIMIT 10
            WITH collect(a) AS topAccounts
            CALL apoc.nodes.cycles(topAccounts, {relTypes: ['TRANSFER'], maxDepth: 10})
            YIELD path
            WITH path, length(path) AS pathLength
            ORDER BY pathLength DESC
            RETURN [node IN nodes(path) | node.AccountNumber] AS Cycle, pathLength AS PathLength",
        columns: &["Cycle", "PathLength"],
    },
    AnalyticsQuery {
        number: 6,
        name: "QUERY-6",
        summary: "Use Louvain communities to uncover potentially colluding accounts.",
        description: "The query groups accounts taking part in transfers of 5000 or more by \
            their Louvain community, surfacing concealed associations. Unusually large \
            communities flag activity involving many accounts for further investigation.",
        cypher: "
            MATCH (a1:Account)-[r:TRANSFER]->(a2:Account)
            WHERE r.transactionAmount >= 5000
            WITH COLLECT(DISTINCT a1) + COLLECT(DISTINCT a2) AS nodes
            UNWIND nodes AS node
            WITH DISTINCT node.{community} AS communityId,
                 COLLECT(DISTINCT node.AccountNumber) AS accountsInCommunity
            WITH communityId, accountsInCommunity, size(accountsInCommunity) AS communitySize
            WHERE communitySize > 1
            RETURN communityId, accountsInCommunity
            ORDER BY communitySize DESC",
        columns: &["communityId", "accountsInCommunity"],
    },
    AnalyticsQuery {
        number: 7,
        name: "QUERY-7",
        summary: "Find transfers between customers located within 50 km of each other.",
        description: "The query measures the distance between the sender's and the receiver's \
            customer locations and keeps pairs closer than 50 km. Money moving between distinct \
            but co-located customers can indicate mule networks operating in one area.",
        cypher: "
            MATCH (c1:Customer)-[:HAS_ACCOUNT]->(a1:Account)-[t:TRANSFER]->(a2:Account)<-[:HAS_ACCOUNT]-(c2:Customer)
            WHERE c1 <> c2
            WITH a1, a2, t,
                 point.distance(
                     point({latitude: c1.Latitude, longitude: c1.Longitude}),
                     point({latitude: c2.Latitude, longitude: c2.Longitude})
                 ) / 1000.0 AS distanceKm
            WHERE distanceKm <= 50
            RETURN a1.AccountNumber AS SenderAccountNumber,
                   a2.AccountNumber AS ReceiverAccountNumber,
                   ROUND(distanceKm, 2) AS DistanceKm,
                   COUNT(t) AS TransferCount,
                   ROUND(SUM(t.transactionAmount), 2) AS TotalAmount
            ORDER BY DistanceKm",
        columns: &[
            "SenderAccountNumber",
            "ReceiverAccountNumber",
            "DistanceKm",
            "TransferCount",
            "TotalAmount",
        ],
    },
    AnalyticsQuery {
        number: 8,
        name: "QUERY-8",
        summary: "Find accounts sending 3 or more transfers within one hour.",
        description: "The query orders each sender's transfers by time and counts the windows in \
            which three consecutive transfers fall inside one hour. Rapid bursts of outgoing \
            transfers are typical of accounts being emptied after a takeover.",
        cypher: "
            MATCH (sender:Account)-[t:TRANSFER]->(:Account)
            WITH sender, t
            ORDER BY t.transferEpoch
            WITH sender, collect(t.transferEpoch) AS epochs
            UNWIND range(0, size(epochs) - 3) AS i
            WITH sender, epochs, i
            WHERE epochs[i + 2] - epochs[i] <= 3600
            WITH sender, COUNT(i) AS BurstWindows, MIN(epochs[i]) AS FirstBurstEpoch
            RETURN sender.AccountNumber AS SenderAccountNumber,
                   BurstWindows,
                   toString(datetime({epochSeconds: toInteger(FirstBurstEpoch)})) AS FirstBurstStart
            ORDER BY BurstWindows DESC",
        columns: &["SenderAccountNumber", "BurstWindows", "FirstBurstStart"],
    },
    AnalyticsQuery {
        number: 9,
        name: "QUERY-9",
        summary: "List the top 10 accounts by PageRank with community and transfer volume.",
        description: "The query lists the 10 most central accounts by PageRank together with \
            their Louvain community and their incoming and outgoing transfer volume, a starting \
            point for reviewing the accounts most money flows through.",
        cypher: "
            MATCH (a:Account)
            WHERE a.{pagerank} IS NOT NULL
            OPTIONAL MATCH (a)-[out:TRANSFER]->()
            WITH a, COUNT(out) AS OutgoingTransfers, COALESCE(SUM(out.transactionAmount), 0) AS outgoing
            OPTIONAL MATCH ()-[inc:TRANSFER]->(a)
            WITH a, OutgoingTransfers, outgoing,
                 COUNT(inc) AS IncomingTransfers, COALESCE(SUM(inc.transactionAmount), 0) AS incoming
            RETURN a.AccountNumber AS AccountNumber,
                   ROUND(a.{pagerank}, 4) AS PageRank,
                   a.{community} AS CommunityId,
                   OutgoingTransfers,
                   ROUND(outgoing, 2) AS OutgoingAmount,
                   IncomingTransfers,
                   ROUND(incoming, 2) AS IncomingAmount
            ORDER BY PageRank DESC
            LIMIT 10",
        columns: &[
            "AccountNumber",
            "PageRank",
            "CommunityId",
            "OutgoingTransfers",
            "OutgoingAmount",
            "IncomingTransfers",
            "IncomingAmount",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_numbered_one_to_nine() {
        let numbers: Vec<u8> = QUERY_CATALOG.iter().map(|q| q.number).collect();
        assert_eq!(numbers, (1..=9).collect::<Vec<u8>>());
        for query in &QUERY_CATALOG {
            assert_eq!(query.name, format!("QUERY-{}", query.number));
        }
    }

    #[test]
    fn test_every_query_names_its_columns_in_return_clause() {
        for query in &QUERY_CATALOG {
            assert!(!query.columns.is_empty(), "{} has no columns", query.name);
            let rendered = query.render(&AnalyticsConfig::default());
            let tail = rendered.rsplit("RETURN").next().unwrap_or_default();
            for column in query.columns {
                assert!(
                    tail.contains(column),
                    "{} does not return column {column}",
                    query.name
                );
            }
        }
    }

    #[test]
    fn test_render_substitutes_configured_properties() {
        let config = AnalyticsConfig {
            pagerank_property: "rank".to_string(),
            community_property: "cluster".to_string(),
            ..AnalyticsConfig::default()
        };

        let q5 = find_query(5).unwrap().render(&config);
        assert!(q5.contains("a.rank DESC"));
        assert!(!q5.contains("{pagerank}"));
        // map literals are left alone
        assert!(q5.contains("{relTypes: ['TRANSFER'], maxDepth: 10}"));

        let q9 = find_query(9).unwrap().render(&config);
        assert!(q9.contains("a.cluster AS CommunityId"));
    }

    #[test]
    fn test_default_render_uses_lowercase_pagerank() {
        let q5 = find_query(5).unwrap().render(&AnalyticsConfig::default());
        assert!(q5.contains("ORDER BY a.pagerank DESC"));
    }

    #[test]
    fn test_find_query_out_of_range() {
        assert!(find_query(0).is_none());
        assert!(find_query(10).is_none());
        assert_eq!(find_query(3).map(|q| q.name), Some("QUERY-3"));
    }
}
