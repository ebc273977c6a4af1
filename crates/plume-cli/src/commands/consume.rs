use anyhow::{Context, Result};
use futures::TryStreamExt;
use plume_authz::{Subject, topic_path};
use plume_provision::{ProvisionConfig, SUBJECT_CLIENT2};
use pulsar::message::proto::command_subscribe::SubType;
use pulsar::{Consumer, TokioExecutor};
use std::time::Duration;

// Per-attempt receive timeout; a lapse just re-arms the wait so Ctrl-C is
// never starved.
const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Durable consumer: receives, acknowledges, and prints messages from the
/// test topic until interrupted.
pub async fn run(config: &ProvisionConfig) -> Result<()> {
    println!("== plume consume (subject `{SUBJECT_CLIENT2}`) ==");

    let subject = Subject::new(SUBJECT_CLIENT2);
    let pulsar = super::messaging_client(config, &subject).await?;

    let topic = topic_path(&config.tenant, &config.namespace, &config.topic);
    let mut consumer: Consumer<String, TokioExecutor> = pulsar
        .consumer()
        .with_topic(&topic)
        .with_subscription("client2-subscription")
        .with_consumer_name("client2-consumer")
        .with_subscription_type(SubType::Exclusive)
        .build()
        .await
        .context("create consumer")?;

    println!("listening on {topic}; Ctrl-C to stop");

    let mut received = 0u64;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
            next = tokio::time::timeout(RECEIVE_TIMEOUT, consumer.try_next()) => {
                match next {
                    // Receive timeout: nothing arrived this attempt.
                    Err(_) => continue,
                    Ok(Ok(Some(msg))) => {
                        consumer.ack(&msg).await.context("acknowledge message")?;
                        received += 1;
                        let payload = msg.deserialize().context("decode payload")?;
                        println!("message {received} received:");
                        println!("  id: {:?}", msg.message_id());
                        println!("  data: {payload}");
                        println!("  received at: @{}", super::epoch_seconds());
                    }
                    Ok(Ok(None)) => {
                        println!("stream closed by broker");
                        break;
                    }
                    Ok(Err(err)) => return Err(err).context("receive message"),
                }
            }
        }
    }

    println!("total messages received: {received}");
    Ok(())
}
