
use std::collections::HashSet;

use commons::load_config;
use commons::start_node;
use commons::WAIT_TIMEOUT;
use linda_space::ExchangeStatus;
use linda_space::LindaClient;
use linda_space::Result;
use linda_space::SERVICE_LENGTH;
use linda_space::SERVICE_REVERSE;
use linda_space::SERVICE_UPPERCASE;
use tokio::time::timeout;

/// Case 1: the basic client walk-through against a fresh server
///
/// - WR/RD/IN on one key
/// - EX through each built-in service
/// - EX with an unknown service consumes the input and writes nothing
#[tokio::test]
async fn test_client_walkthrough_case1() -> Result<()> {
    let (addr, graceful_tx, handle) = start_node(load_config("loopback.toml")).await?;
    let mut client = LindaClient::connect(addr).await?;

    client.write("k1", "value1").await?;
    assert_eq!(client.read("k1").await?, "value1");
    assert_eq!(client.take("k1").await?, "value1");

    client.write("in1", "abcdef").await?;
    assert_eq!(client.exchange("in1", "out1", SERVICE_UPPERCASE).await?, ExchangeStatus::Ok);
    assert_eq!(client.read("out1").await?, "ABCDEF");

    client.write("in2", "abcdef").await?;
    assert_eq!(client.exchange("in2", "out2", SERVICE_REVERSE).await?, ExchangeStatus::Ok);
    assert_eq!(client.take("out2").await?, "fedcba");

    client.write("in3", "hello world").await?;
    assert_eq!(client.exchange("in3", "out3", SERVICE_LENGTH).await?, ExchangeStatus::Ok);
    assert_eq!(client.take("out3").await?, "11");

    client.write("in4", "xyz").await?;
    assert_eq!(client.exchange("in4", "out4", 99).await?, ExchangeStatus::NoService);

    // in4 was consumed: a fresh write is the only thing a take can see now.
    client.write("in4", "fresh").await?;
    assert_eq!(client.take("in4").await?, "fresh");

    graceful_tx.send(()).ok();
    handle.await.expect("node task")?;
    Ok(())
}

/// Case 2: producers and consumers on separate connections
///
/// Every produced tuple is taken by exactly one consumer.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_producers_and_consumers_case2() -> Result<()> {
    const PRODUCERS: usize = 3;
    const PER_PRODUCER: usize = 20;
    const CONSUMERS: usize = 4;
    let total = PRODUCERS * PER_PRODUCER;

    let (addr, graceful_tx, handle) = start_node(load_config("loopback.toml")).await?;

    let mut consumers = Vec::new();
    for c in 0..CONSUMERS {
        let share = total / CONSUMERS + usize::from(c < total % CONSUMERS);
        consumers.push(tokio::spawn(async move {
            let mut client = LindaClient::connect(addr).await?;
            let mut seen = Vec::with_capacity(share);
            for _ in 0..share {
                seen.push(client.take("jobs").await?);
            }
            Ok::<_, linda_space::Error>(seen)
        }));
    }

    let mut producers = Vec::new();
    for p in 0..PRODUCERS {
        producers.push(tokio::spawn(async move {
            let mut client = LindaClient::connect(addr).await?;
            for i in 0..PER_PRODUCER {
                client.write("jobs", &format!("p{}-{}", p, i)).await?;
            }
            Ok::<_, linda_space::Error>(())
        }));
    }

    for producer in producers {
        producer.await.expect("producer task")?;
    }

    let mut all = HashSet::new();
    for consumer in consumers {
        let seen = timeout(WAIT_TIMEOUT, consumer)
            .await
            .expect("consumers finish")
            .expect("consumer task")?;
        for value in seen {
            assert!(all.insert(value), "tuple delivered twice");
        }
    }
    assert_eq!(all.len(), total);

    graceful_tx.send(()).ok();
    handle.await.expect("node task")?;
    Ok(())
}

/// Case 3: an exchange pipeline across connections
///
/// stage 1 uppercases `raw` into `upper`, stage 2 reverses `upper` into
/// `done`. Both stages block until their input exists.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_exchange_pipeline_case3() -> Result<()> {
    let (addr, graceful_tx, handle) = start_node(load_config("loopback.toml")).await?;

    let stage2 = tokio::spawn(async move {
        let mut client = LindaClient::connect(addr).await?;
        client.exchange("upper", "done", SERVICE_REVERSE).await
    });
    let stage1 = tokio::spawn(async move {
        let mut client = LindaClient::connect(addr).await?;
        client.exchange("raw", "upper", SERVICE_UPPERCASE).await
    });

    let mut client = LindaClient::connect(addr).await?;
    client.write("raw", "linda").await?;

    let done = timeout(WAIT_TIMEOUT, client.take("done")).await.expect("pipeline completes")?;
    assert_eq!(done, "ADNIL");
    assert_eq!(stage1.await.expect("stage1 task")?, ExchangeStatus::Ok);
    assert_eq!(stage2.await.expect("stage2 task")?, ExchangeStatus::Ok);

    graceful_tx.send(()).ok();
    handle.await.expect("node task")?;
    Ok(())
}
