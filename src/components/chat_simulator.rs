use gloo_timers::callback::Interval;
use web_sys::Element;
use yew::prelude::*;

const MESSAGE_INTERVAL_MS: u32 = 2_500;

#[derive(Clone, Copy, PartialEq)]
enum Speaker {
    Customer,
    Assistant,
}

struct ChatMessage {
    from: Speaker,
    text: &'static str,
    time: &'static str,
    booking: bool,
}

const fn customer(text: &'static str, time: &'static str) -> ChatMessage {
    ChatMessage { from: Speaker::Customer, text, time, booking: false }
}

const fn assistant(text: &'static str, time: &'static str) -> ChatMessage {
    ChatMessage { from: Speaker::Assistant, text, time, booking: false }
}

// Real FueGenix conversation, shortened.
const CONVERSATION: &[ChatMessage] = &[
    customer("Hoi, ik zou graag meer willen weten", "21:40"),
    customer("Ik wil een idee krijgen van de kosten", "21:40"),
    assistant("Hallo! Ik ben Sohaib, Dr. Munib's assistent", "21:41"),
    assistant("Mag ik je naam? En kun je delen wat je specifiek interesseert aan FueGenix?", "21:41"),
    customer("Ik heb goede reviews gelezen van Dr. Munib", "21:45"),
    customer("Maar ik wil zeker weten dat de kosten haalbaar zijn voor mij", "21:45"),
    customer("Ik heb een andere kliniek in Istanbul gezien voor €3.000", "21:45"),
    assistant("Bij FueGenix is de startprijs voor een transplantatie €40.000", "21:51"),
    assistant("Valt dit binnen je budget?", "21:51"),
    customer("Eerlijk gezegd helaas niet. Het maximum wat ik kan is €10.000", "21:54"),
    assistant("Ik begrijp het. Als je situatie verandert, neem gerust contact op", "21:56"),
    customer("Zou het mogelijk zijn om mijn zaak aan Dr. Munib voor te leggen?", "21:57"),
    assistant("Onze prijsstructuur is vast vanwege de hoge vraag en kwaliteit", "21:58"),
    customer("[3 dagen later] Ik heb nog een vraag...", "23:05"),
    assistant("Fijn om weer van je te horen! Wat wil je weten?", "23:06"),
    customer("Is er een beoordeling om te zien of ik überhaupt kwalificeer?", "23:07"),
    assistant("Ja, we doen virtuele consulten via Zoom voor €1.000", "23:12"),
    customer("[1 week later] Ik heb de betaling voltooid", "21:57"),
    ChatMessage {
        from: Speaker::Assistant,
        text: "Dank je! Dr. Munib zal binnen 1-2 weken contact opnemen",
        time: "21:59",
        booking: true,
    },
];

/// Index of the message to reveal after `current`, or `None` once the whole
/// conversation is visible.
pub fn next_message(current: usize, len: usize) -> Option<usize> {
    let next = current + 1;
    (next < len).then_some(next)
}

#[function_component(ChatSimulator)]
pub fn chat_simulator() -> Html {
    let step = use_state(|| 0usize);
    let running = use_state(|| false);
    let chat_ref = use_node_ref();

    {
        let step = step.clone();
        let running_setter = running.clone();
        use_effect_with_deps(
            move |is_running| {
                let interval = is_running.then(|| {
                    let mut current = 0usize;
                    Interval::new(MESSAGE_INTERVAL_MS, move || {
                        match next_message(current, CONVERSATION.len()) {
                            Some(next) => {
                                current = next;
                                step.set(next);
                            }
                            None => running_setter.set(false),
                        }
                    })
                });
                move || drop(interval)
            },
            *running,
        );
    }

    {
        let chat_ref = chat_ref.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(chat) = chat_ref.cast::<Element>() {
                    chat.set_scroll_top(chat.scroll_height());
                }
                || ()
            },
            *step,
        );
    }

    let start = {
        let step = step.clone();
        let running = running.clone();
        Callback::from(move |_: MouseEvent| {
            step.set(0);
            running.set(true);
        })
    };

    let reset = {
        let step = step.clone();
        let running = running.clone();
        Callback::from(move |_: MouseEvent| {
            running.set(false);
            step.set(0);
        })
    };

    let finished = !*running && *step + 1 >= CONVERSATION.len();

    html! {
        <div class="chat-simulator">
            <div class="chat-header">
                <h3>{"Deze echte conversatie genereerde €40K+ omzet"}</h3>
                <div class="chat-controls">
                    <button onclick={start} disabled={*running}>
                        { if *running { "Speelt af..." } else { "Bekijk" } }
                    </button>
                    <button onclick={reset}>{"Reset"}</button>
                </div>
            </div>
            <div class="chat-window">
                <div class="chat-title">
                    <span>{"WhatsApp Business - FueGenix"}</span>
                    <span class="chat-subtitle">{"Haartransplantatie kliniek"}</span>
                </div>
                <div class="chat-messages" ref={chat_ref}>
                    { CONVERSATION.iter().take(*step + 1).enumerate().map(|(index, msg)| {
                        let grouped = index > 0 && CONVERSATION[index - 1].from == msg.from;
                        let side = if msg.from == Speaker::Assistant { "from-ai" } else { "from-customer" };
                        html! {
                            <div class={classes!("chat-row", side, grouped.then(|| "grouped"))}>
                                <div class="chat-bubble">
                                    if msg.from == Speaker::Assistant && index == *step && *running {
                                        <div class="chat-typing">{"AI typt..."}</div>
                                    }
                                    <p>{msg.text}</p>
                                    <div class="chat-time">{msg.time}</div>
                                    if msg.booking {
                                        <div class="chat-booking">{"$1K Consultatie → $40K Procedure"}</div>
                                    }
                                </div>
                            </div>
                        }
                    }).collect::<Html>() }
                </div>
                if finished {
                    <div class="chat-result">
                        <div class="chat-result-title">{"€40,000+ Procedure Geboekt"}</div>
                        <div>{"\"Budget te laag\" lead → Betalende klant in 14 dagen"}</div>
                    </div>
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulator_steps_through_every_message_once() {
        let mut seen = vec![0];
        let mut current = 0;
        while let Some(next) = next_message(current, CONVERSATION.len()) {
            seen.push(next);
            current = next;
        }
        assert_eq!(seen, (0..CONVERSATION.len()).collect::<Vec<_>>());
    }

    #[test]
    fn conversation_ends_with_the_booking() {
        let last = CONVERSATION.last().map(|m| m.booking);
        assert_eq!(last, Some(true));
        assert_eq!(CONVERSATION.iter().filter(|m| m.booking).count(), 1);
        assert_eq!(next_message(0, 1), None);
    }
}
