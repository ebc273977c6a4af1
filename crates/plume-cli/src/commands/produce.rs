use anyhow::{Context, Result};
use plume_authz::{Subject, topic_path};
use plume_provision::{ProvisionConfig, SUBJECT_CLIENT1};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive producer: each non-empty stdin line becomes one message on
/// the test topic, stamped with the send time. Ends on `exit`, EOF, or
/// Ctrl-C.
pub async fn run(config: &ProvisionConfig) -> Result<()> {
    println!("== plume produce (subject `{SUBJECT_CLIENT1}`) ==");

    let subject = Subject::new(SUBJECT_CLIENT1);
    let pulsar = super::messaging_client(config, &subject).await?;

    let topic = topic_path(&config.tenant, &config.namespace, &config.topic);
    let mut producer = pulsar
        .producer()
        .with_topic(&topic)
        .with_name("client1-producer")
        .build()
        .await
        .context("create producer")?;

    println!("producer ready on {topic}");
    println!("type a message and press enter; `exit` (or Ctrl-C) to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut sent = 0u64;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("read stdin")? else {
                    break;
                };
                let line = line.trim();
                if line.eq_ignore_ascii_case("exit") {
                    break;
                }
                if line.is_empty() {
                    println!("empty message, skipped");
                    continue;
                }

                let payload = format!("{line} @{}", super::epoch_seconds());
                let receipt = producer
                    .send_non_blocking(payload)
                    .await
                    .context("enqueue message")?
                    .await
                    .context("await send receipt")?;
                sent += 1;
                println!("sent message {sent} (id {:?})", receipt.message_id);
            }
        }
    }

    println!("total messages sent: {sent}");
    Ok(())
}
