// ============================================================================
// DEMANDES - Solicitudes de intervención; el admin acepta o rechaza
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::{errors_of, field_error, Modal, SelectField, Spinner, TextAreaField, TextField};
use crate::hooks::{use_app_context, use_session};
use crate::models::demande::{Demande, DemandeForm, DemandeStatus, Priorite};
use crate::models::machine::Machine;
use crate::utils::FieldErrors;
use crate::viewmodels::demande_viewmodel::Decision;
use crate::viewmodels::{DemandeViewModel, MachineViewModel};

#[function_component(DemandesPage)]
pub fn demandes_page() -> Html {
    let context = use_app_context();
    let session = use_session();
    let vm = DemandeViewModel::new(context.gateway());
    let demandes = use_state(Vec::<Demande>::new);
    let loading = use_state(|| true);
    let statut = use_state(|| None::<DemandeStatus>);
    let priorite = use_state(|| None::<Priorite>);
    let creating = use_state(|| false);
    // Demande abierta en el diálogo de decisión
    let deciding = use_state(|| None::<(Demande, Decision)>);
    let reload = use_state(|| 0u32);

    {
        let demandes = demandes.clone();
        let loading = loading.clone();
        let vm = vm.clone();
        use_effect_with(*reload, move |_| {
            loading.set(true);
            spawn_local(async move {
                if let Ok(list) = vm.load().await {
                    demandes.set(list);
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_statut = {
        let statut = statut.clone();
        Callback::from(move |e: Event| {
            statut.set(DemandeStatus::parse(&e.target_unchecked_into::<HtmlSelectElement>().value()))
        })
    };
    let on_priorite = {
        let priorite = priorite.clone();
        Callback::from(move |e: Event| {
            priorite.set(Priorite::parse(&e.target_unchecked_into::<HtmlSelectElement>().value()))
        })
    };

    let on_created = {
        let creating = creating.clone();
        let reload = reload.clone();
        Callback::from(move |_: Demande| {
            creating.set(false);
            reload.set(*reload + 1);
        })
    };

    let on_decided = {
        let demandes = demandes.clone();
        let deciding = deciding.clone();
        Callback::from(move |updated: Demande| {
            let mut list = (*demandes).clone();
            if let Some(slot) = list.iter_mut().find(|d| d.id == updated.id) {
                *slot = updated;
            }
            demandes.set(list);
            deciding.set(None);
        })
    };

    let is_admin = session.is_admin();
    let visible = DemandeViewModel::filter(&demandes, *statut, *priorite);
    let rows = visible.iter().map(|demande| {
        let open = |decision: Decision| {
            let deciding = deciding.clone();
            let demande = (*demande).clone();
            Callback::from(move |_| deciding.set(Some((demande.clone(), decision))))
        };
        html! {
            <tr key={demande.id}>
                <td>
                    <strong>{demande.titre.clone()}</strong>
                    <div class="muted">{demande.description.clone()}</div>
                    if let Some(comment) = demande.commentaire_admin.clone() {
                        <div class="admin-comment">{format!("💬 {}", comment)}</div>
                    }
                </td>
                <td>{demande.machine_name()}</td>
                <td>{demande.user.as_ref().map(|u| u.name.clone()).unwrap_or_else(|| "—".to_string())}</td>
                <td><span class={demande.priorite.badge_class()}>{demande.priorite.label()}</span></td>
                <td><span class={demande.statut.badge_class()}>{demande.statut.label()}</span></td>
                <td class="actions">
                    if is_admin && demande.is_open() {
                        <button class="btn btn-small btn-success" onclick={open(Decision::Accept)}>{"Accepter"}</button>
                        <button class="btn btn-small btn-danger" onclick={open(Decision::Refuse)}>{"Refuser"}</button>
                    }
                </td>
            </tr>
        }
    });

    html! {
        <div class="page">
            <div class="page-header">
                <h1>{"Demandes"}</h1>
                <button class="btn btn-primary" onclick={{
                    let creating = creating.clone();
                    Callback::from(move |_| creating.set(true))
                }}>{"+ Nouvelle demande"}</button>
            </div>

            <div class="filters">
                <select onchange={on_statut}>
                    <option value="">{"Tous les statuts"}</option>
                    { for DemandeStatus::ALL.iter().map(|s| html! {
                        <option value={s.as_str()} selected={*statut == Some(*s)}>{s.label()}</option>
                    }) }
                </select>
                <select onchange={on_priorite}>
                    <option value="">{"Toutes les priorités"}</option>
                    { for Priorite::ALL.iter().map(|p| html! {
                        <option value={p.as_str()} selected={*priorite == Some(*p)}>{p.label()}</option>
                    }) }
                </select>
            </div>

            if *loading {
                <Spinner />
            } else if visible.is_empty() {
                <p class="empty-state">{"Aucune demande"}</p>
            } else {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Demande"}</th>
                            <th>{"Machine"}</th>
                            <th>{"Demandeur"}</th>
                            <th>{"Priorité"}</th>
                            <th>{"Statut"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{ for rows }</tbody>
                </table>
            }

            if *creating {
                <DemandeFormModal on_saved={on_created} on_close={{
                    let creating = creating.clone();
                    Callback::from(move |_| creating.set(false))
                }} />
            }
            if let Some((demande, decision)) = (*deciding).clone() {
                <DecisionModal {demande} {decision} on_decided={on_decided} on_close={{
                    let deciding = deciding.clone();
                    Callback::from(move |_| deciding.set(None))
                }} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct DemandeFormModalProps {
    on_saved: Callback<Demande>,
    on_close: Callback<()>,
}

#[function_component(DemandeFormModal)]
fn demande_form_modal(props: &DemandeFormModalProps) -> Html {
    let context = use_app_context();
    let form = use_state(DemandeForm::default);
    let machines = use_state(Vec::<Machine>::new);
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);

    {
        let machines = machines.clone();
        let vm = MachineViewModel::new(context.gateway());
        use_effect_with((), move |_| {
            spawn_local(async move {
                machines.set(vm.load_actives().await.unwrap_or_default());
            });
            || ()
        });
    }

    let update = |apply: fn(&mut DemandeForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let vm = DemandeViewModel::new(context.gateway());
        let toasts = context.toasts.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = (*form).clone();
            let errors = errors.clone();
            let submitting = submitting.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            let on_saved = on_saved.clone();
            submitting.set(true);
            spawn_local(async move {
                match vm.create(&data).await {
                    Ok(demande) => {
                        toasts.success("Demande envoyée");
                        on_saved.emit(demande);
                    }
                    Err(e) => errors.set(errors_of(&e)),
                }
                submitting.set(false);
            });
        })
    };

    let machine_options: Vec<(String, String)> =
        machines.iter().map(|m| (m.id.to_string(), m.nom.clone())).collect();
    let priorite_options: Vec<(String, String)> = Priorite::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), p.label().to_string()))
        .collect();

    html! {
        <Modal title="Nouvelle demande" on_close={props.on_close.clone()}>
            <form class="entity-form" onsubmit={on_submit}>
                <TextField label="Titre *" name="titre" value={form.titre.clone()}
                    on_change={update(|f, v| f.titre = v)} error={field_error(&errors, "titre")} />
                <SelectField label="Machine *" name="machine_id"
                    value={form.machine_id.map(|id| id.to_string()).unwrap_or_default()}
                    options={machine_options} placeholder="Choisir une machine"
                    on_change={update(|f, v| f.machine_id = v.parse().ok())}
                    error={field_error(&errors, "machine_id")} />
                <SelectField label="Priorité" name="priorite" value={form.priorite.as_str()}
                    options={priorite_options}
                    on_change={update(|f, v| f.priorite = Priorite::parse(&v).unwrap_or(f.priorite))} />
                <TextAreaField label="Description *" name="description" value={form.description.clone()}
                    on_change={update(|f, v| f.description = v)} error={field_error(&errors, "description")} />
                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" onclick={props.on_close.reform(|_| ())}>
                        {"Annuler"}
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>{"Envoyer"}</button>
                </div>
            </form>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
struct DecisionModalProps {
    demande: Demande,
    decision: Decision,
    on_decided: Callback<Demande>,
    on_close: Callback<()>,
}

/// Confirmación con comentario opcional para el solicitante
#[function_component(DecisionModal)]
fn decision_modal(props: &DecisionModalProps) -> Html {
    let context = use_app_context();
    let comment = use_state(String::new);
    let submitting = use_state(|| false);

    let on_comment = {
        let comment = comment.clone();
        Callback::from(move |value: String| comment.set(value))
    };

    let on_confirm = {
        let comment = comment.clone();
        let submitting = submitting.clone();
        let vm = DemandeViewModel::new(context.gateway());
        let toasts = context.toasts.clone();
        let on_decided = props.on_decided.clone();
        let (id, decision) = (props.demande.id, props.decision);
        Callback::from(move |_| {
            let text = (*comment).clone();
            let submitting = submitting.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            let on_decided = on_decided.clone();
            submitting.set(true);
            spawn_local(async move {
                if let Ok(updated) = vm.decide(&mut [], id, decision, &text).await {
                    toasts.success(match decision {
                        Decision::Accept => "Demande acceptée",
                        Decision::Refuse => "Demande refusée",
                    });
                    on_decided.emit(updated);
                }
                submitting.set(false);
            });
        })
    };

    let (title, label) = match props.decision {
        Decision::Accept => ("Accepter la demande", "Accepter"),
        Decision::Refuse => ("Refuser la demande", "Refuser"),
    };

    html! {
        <Modal {title} on_close={props.on_close.clone()}>
            <p><strong>{props.demande.titre.clone()}</strong>{format!(" ({})", props.demande.machine_name())}</p>
            <TextAreaField label="Commentaire (optionnel)" name="commentaire_admin" value={(*comment).clone()}
                on_change={on_comment} />
            <div class="form-actions">
                <button type="button" class="btn btn-secondary" onclick={props.on_close.reform(|_| ())}>
                    {"Annuler"}
                </button>
                <button type="button" class={if props.decision == Decision::Accept { "btn btn-success" } else { "btn btn-danger" }}
                    disabled={*submitting} onclick={on_confirm}>
                    {label}
                </button>
            </div>
        </Modal>
    }
}
